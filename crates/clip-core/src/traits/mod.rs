//! Ports - repository and storage traits implemented by the infrastructure layer

mod repositories;
mod storage;

pub use repositories::{
    ChannelStats, CommentRepository, CommentThread, CreatorStats, LikeSnapshot,
    NotificationRepository, NotificationView, ReactionRepository, ReactionSnapshot, RepoResult,
    Report, ReportRepository, SubscriptionRepository, UserRepository, VideoQuery, VideoRepository,
    VideoSort,
};
pub use storage::{Bucket, ObjectStorage};
