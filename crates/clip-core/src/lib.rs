//! # clip-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! reaction transition rules. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_comment_text, Comment, Notification, NotificationKind, Reaction, ReactionKind,
    Subscription, User, Video, MAX_COMMENT_LEN,
};
pub use entities::reaction::{transition, LedgerOp, Transition};
pub use error::DomainError;
pub use traits::{
    Bucket, ChannelStats, CommentRepository, CommentThread, CreatorStats, LikeSnapshot,
    NotificationRepository, NotificationView, ObjectStorage, ReactionRepository, ReactionSnapshot,
    RepoResult, Report, ReportRepository, SubscriptionRepository, UserRepository, VideoQuery,
    VideoRepository, VideoSort,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
