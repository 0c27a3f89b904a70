//! Domain entities - core business objects

mod comment;
mod notification;
pub mod reaction;
mod subscription;
mod user;
mod video;

pub use comment::{normalize_comment_text, Comment, MAX_COMMENT_LEN};
pub use notification::{Notification, NotificationKind};
pub use reaction::{Reaction, ReactionKind};
pub use subscription::Subscription;
pub use user::User;
pub use video::Video;
