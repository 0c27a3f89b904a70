//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in clip-core.
//! Engagement mutations that span a ledger row, a counter, and a
//! notification insert run in a single transaction inside the method.

mod comment;
mod error;
mod notification;
mod notify;
mod reaction;
mod report;
mod subscription;
mod user;
mod video;

pub use comment::PgCommentRepository;
pub use notification::PgNotificationRepository;
pub use reaction::PgReactionRepository;
pub use report::PgReportRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
