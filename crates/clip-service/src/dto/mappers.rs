//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs,
//! plus hydration helpers for responses that join in author data.

use std::collections::HashMap;

use clip_core::traits::{
    ChannelStats, CommentThread, CreatorStats, LikeSnapshot, NotificationView, ReactionSnapshot,
};
use clip_core::{Snowflake, User, Video};

use super::responses::{
    ChannelResponse, CommentLikeResponse, CommentResponse, CreatorStatsResponse,
    CurrentUserResponse, NotificationResponse, ReactionStateResponse, UserResponse, VideoResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            verified: user.verified,
            unread: 0,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl CurrentUserResponse {
    /// Attach the unread notification badge
    pub fn with_unread(mut self, unread: i64) -> Self {
        self.unread = unread;
        self
    }
}

/// Helper struct for building a channel page response
pub struct ChannelProfile {
    pub user: User,
    pub stats: ChannelStats,
    pub subscribed: bool,
}

impl From<ChannelProfile> for ChannelResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            id: profile.user.id.to_string(),
            username: profile.user.username,
            display_name: profile.user.display_name,
            avatar: profile.user.avatar,
            bio: profile.user.bio,
            verified: profile.user.verified,
            subscribers: profile.stats.subscribers,
            videos: profile.stats.videos,
            total_views: profile.stats.total_views,
            subscribed: profile.subscribed,
            created_at: profile.user.created_at,
        }
    }
}

impl From<CreatorStats> for CreatorStatsResponse {
    fn from(stats: CreatorStats) -> Self {
        Self {
            total_videos: stats.total_videos,
            total_views: stats.total_views,
            total_likes: stats.total_likes,
            subscribers: stats.subscribers,
        }
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

impl From<&Video> for VideoResponse {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.to_string(),
            owner_id: video.owner_id.to_string(),
            title: video.title.clone(),
            description: video.description.clone(),
            tags: video.tags.clone(),
            video_url: video.video_url.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
            duration: video.duration,
            quality: video.quality.clone(),
            is_short: video.is_short,
            views: video.views,
            likes_count: video.likes_count,
            dislikes_count: video.dislikes_count,
            comments_count: video.comments_count,
            shares: video.shares,
            user_liked: 0,
            author: None,
            created_at: video.created_at,
        }
    }
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self::from(&video)
    }
}

impl VideoResponse {
    /// Attach the uploader's public profile
    pub fn with_author(mut self, author: Option<&User>) -> Self {
        self.author = author.map(UserResponse::from);
        self
    }

    /// Attach the viewer's reaction value (1, -1, or 0)
    pub fn with_reaction(mut self, value: i16) -> Self {
        self.user_liked = value;
        self
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionSnapshot> for ReactionStateResponse {
    fn from(snapshot: ReactionSnapshot) -> Self {
        Self {
            value: snapshot.state.map_or(0, |kind| kind.value()),
            likes: snapshot.likes,
            dislikes: snapshot.dislikes,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<LikeSnapshot> for CommentLikeResponse {
    fn from(snapshot: LikeSnapshot) -> Self {
        Self {
            liked: snapshot.liked,
            likes: snapshot.likes,
        }
    }
}

/// Map a comment thread to its response, hydrating authors from a
/// pre-fetched lookup. Authors missing from the lookup serialize as absent.
pub fn comment_thread_response(
    thread: &CommentThread,
    authors: &HashMap<Snowflake, User>,
) -> CommentResponse {
    let comment = &thread.comment;
    CommentResponse {
        id: comment.id.to_string(),
        video_id: comment.video_id.to_string(),
        parent_id: comment.parent_id.map(|id| id.to_string()),
        text: comment.text.clone(),
        pinned: comment.pinned,
        likes_count: comment.likes_count,
        viewer_liked: thread.viewer_liked,
        author: authors.get(&comment.author_id).map(UserResponse::from),
        replies: thread
            .replies
            .iter()
            .map(|reply| comment_thread_response(reply, authors))
            .collect(),
        created_at: comment.created_at,
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&NotificationView> for NotificationResponse {
    fn from(view: &NotificationView) -> Self {
        Self {
            id: view.notification.id.to_string(),
            kind: view.notification.kind.as_str().to_string(),
            origin_id: view.notification.origin_id.to_string(),
            origin_username: view.origin_username.clone(),
            origin_avatar: view.origin_avatar.clone(),
            video_id: view.notification.video_id.map(|id| id.to_string()),
            video_title: view.video_title.clone(),
            read: view.notification.read,
            created_at: view.notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clip_core::ReactionKind;

    #[test]
    fn test_reaction_snapshot_value() {
        let liked = ReactionSnapshot {
            state: Some(ReactionKind::Like),
            likes: 3,
            dislikes: 1,
        };
        let response = ReactionStateResponse::from(liked);
        assert_eq!(response.value, 1);

        let cleared = ReactionSnapshot {
            state: None,
            likes: 2,
            dislikes: 1,
        };
        assert_eq!(ReactionStateResponse::from(cleared).value, 0);
    }

    #[test]
    fn test_video_response_author_hydration() {
        let video = Video::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "title".into(),
            String::new(),
            String::new(),
            "https://cdn.example/v.mp4".into(),
            None,
            10.0,
            "720p".into(),
            false,
        );
        let author = User::new(Snowflake::new(1), "alice".into(), "Alice".into());

        let response = VideoResponse::from(&video).with_author(Some(&author));
        assert_eq!(response.author.unwrap().username, "alice");
        assert_eq!(response.owner_id, "1");
    }
}
