//! Database models
//!
//! Plain structs with SQLx `FromRow` derives, one per table shape. Mapping to
//! domain entities lives in the `mappers` module.

mod comment;
mod notification;
mod reaction;
mod report;
mod user;
mod video;

pub use comment::{CommentModel, CommentWithViewerModel};
pub use notification::{NotificationModel, NotificationViewModel};
pub use reaction::ReactionModel;
pub use report::ReportModel;
pub use user::UserModel;
pub use video::VideoModel;
