//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that must keep the ledger, the
//! denormalized counters, and the notification inbox consistent are exposed
//! as single methods so the implementation can run them in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, Notification, ReactionKind, User, Video};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username (case-insensitive)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Fetch several users at once, for author hydration
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Video Repository
// ============================================================================

/// Browse ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    /// Newest first
    #[default]
    Latest,
    /// Most viewed first
    Popular,
    /// Highest `views * 2 + likes_count` first
    Trending,
}

/// Filter and ordering options for video listings
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    pub sort: VideoSort,
    /// When set, only videos with a matching shorts flag
    pub shorts: Option<bool>,
    /// Case-insensitive substring match over title, description, and tags
    pub search: Option<String>,
    /// Restrict to one uploader's videos
    pub channel_id: Option<Snowflake>,
    pub limit: i64,
}

/// Public stats for a channel page
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelStats {
    pub subscribers: i64,
    pub videos: i64,
    pub total_views: i64,
}

/// Aggregates across everything a creator uploaded
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatorStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub subscribers: i64,
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Find video by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    /// Create a new video with zeroed counters
    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// List videos by the given filter and ordering
    async fn list(&self, query: VideoQuery) -> RepoResult<Vec<Video>>;

    /// Record one view and return the new view count.
    ///
    /// When a viewer is known, their watch history entry for this video is
    /// inserted or its timestamp refreshed, in the same transaction as the
    /// counter bump. Every call counts, including repeats by the same viewer.
    async fn record_view(&self, video_id: Snowflake, viewer: Option<Snowflake>) -> RepoResult<i64>;

    /// Personalized feed: uploads from subscribed channels plus anything
    /// that crossed the popularity threshold, newest first
    async fn feed(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>>;

    /// Watch history, most recently watched first
    async fn history(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>>;

    /// Watch-later list, most recently saved first
    async fn watch_later(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>>;

    /// Toggle a video on the user's watch-later list; returns whether it is
    /// saved after the call
    async fn toggle_watch_later(&self, user_id: Snowflake, video_id: Snowflake)
        -> RepoResult<bool>;

    /// Increment the share counter and return the new value
    async fn add_share(&self, video_id: Snowflake) -> RepoResult<i64>;

    /// Delete a video owned by `owner_id`, cascading its engagement rows.
    /// Fails with `NotVideoOwner` when the caller does not own it.
    async fn delete_owned(&self, video_id: Snowflake, owner_id: Snowflake) -> RepoResult<()>;

    /// Public stats for a channel page
    async fn channel_stats(&self, channel_id: Snowflake) -> RepoResult<ChannelStats>;

    /// Aggregates for the creator dashboard
    async fn creator_stats(&self, user_id: Snowflake) -> RepoResult<CreatorStats>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// Counters and viewer state after a reaction write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionSnapshot {
    /// The caller's reaction after the write
    pub state: Option<ReactionKind>,
    pub likes: i64,
    pub dislikes: i64,
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's current reaction to a video, if any
    async fn find(&self, user_id: Snowflake, video_id: Snowflake)
        -> RepoResult<Option<ReactionKind>>;

    /// The user's reactions across a batch of videos. Videos without a
    /// reaction are absent from the result.
    async fn find_many(
        &self,
        user_id: Snowflake,
        video_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionKind)>>;

    /// Apply a desired reaction state atomically.
    ///
    /// The ledger row and both counters change in one transaction; concurrent
    /// calls for the same video serialize on its row lock.
    /// Resubmitting the current kind toggles it off.
    async fn set(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
        desired: Option<ReactionKind>,
    ) -> RepoResult<ReactionSnapshot>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// A top-level comment with its replies, oldest reply first
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub comment: Comment,
    /// Whether the requesting viewer has liked this comment
    pub viewer_liked: bool,
    /// Direct replies; always empty on the reply entries themselves
    pub replies: Vec<CommentThread>,
}

/// Comment like state after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeSnapshot {
    pub liked: bool,
    pub likes: i64,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Insert a comment.
    ///
    /// Top-level comments bump the video's comment counter and notify the
    /// video owner in the same transaction, unless they wrote the comment
    /// themselves. Replies do neither.
    async fn post(&self, comment: &Comment) -> RepoResult<()>;

    /// Top-level comments for a video with their oldest replies attached,
    /// pinned first, then most liked, then newest
    async fn list_top_level(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<CommentThread>>;

    /// Toggle the caller's like on a comment
    async fn toggle_like(&self, user_id: Snowflake, comment_id: Snowflake)
        -> RepoResult<LikeSnapshot>;

    /// Toggle the pinned flag; pinning unpins any other comment on the same
    /// video. Returns the new pinned state.
    async fn toggle_pin(&self, comment_id: Snowflake) -> RepoResult<bool>;

    /// Delete a comment and its replies, adjusting the video's comment
    /// counter for the top-level rows removed
    async fn delete(&self, comment_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Toggle the caller's subscription to a channel; returns whether they
    /// are subscribed after the call. Subscribing notifies the channel owner
    /// in the same transaction.
    async fn toggle(&self, subscriber_id: Snowflake, channel_id: Snowflake) -> RepoResult<bool>;

    /// Whether the user is subscribed to the channel
    async fn is_subscribed(&self, subscriber_id: Snowflake, channel_id: Snowflake)
        -> RepoResult<bool>;

    /// Subscriber count for a channel
    async fn count_for_channel(&self, channel_id: Snowflake) -> RepoResult<i64>;

    /// Channels the user subscribes to, most recent first
    async fn list_channels(&self, subscriber_id: Snowflake) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// A notification joined with display data about its origin
#[derive(Debug, Clone)]
pub struct NotificationView {
    pub notification: Notification,
    pub origin_username: String,
    pub origin_avatar: Option<String>,
    /// Title of the related video, when one exists
    pub video_title: Option<String>,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// List the newest notifications for a user and mark every returned row
    /// read, in one transaction. Reading the inbox empties the unread badge.
    async fn list_and_mark_read(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<NotificationView>>;

    /// Unread notification count
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Report Repository
// ============================================================================

/// A user-submitted content report
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Snowflake,
    pub reporter_id: Snowflake,
    pub video_id: Snowflake,
    pub reason: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// File a report against a video
    async fn create(&self, report: &Report) -> RepoResult<()>;
}
