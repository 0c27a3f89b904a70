//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with access token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: CurrentUserResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes bio and the unread
/// notification badge)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub verified: bool,
    pub unread: i64,
    pub created_at: DateTime<Utc>,
}

/// Channel page response: profile plus public stats and the viewer's
/// subscription state
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub verified: bool,
    pub subscribers: i64,
    pub videos: i64,
    pub total_views: i64,
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
}

/// Creator dashboard aggregates
#[derive(Debug, Clone, Serialize)]
pub struct CreatorStatsResponse {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub subscribers: i64,
}

// ============================================================================
// Video Responses
// ============================================================================

/// Video response with denormalized engagement counters.
///
/// `user_liked` is the viewer's reaction value (1, -1, or 0); it stays 0 for
/// anonymous callers.
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub duration: f64,
    pub quality: String,
    pub is_short: bool,
    pub views: i64,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments_count: i64,
    pub shares: i64,
    pub user_liked: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
}

/// Video detail response: the video plus channel and viewer context.
///
/// `user_subscribed` stays false for anonymous callers.
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetailResponse {
    #[serde(flatten)]
    pub video: VideoResponse,
    pub channel_subs: i64,
    pub user_subscribed: bool,
}

/// View count after recording a view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewCountResponse {
    pub views: i64,
}

/// Share count after recording a share
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShareCountResponse {
    pub shares: i64,
}

/// Watch-later state after a toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WatchLaterResponse {
    pub saved: bool,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// The caller's reaction state and both counters after a write.
///
/// `value` is 1, -1, or 0 for no reaction.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionStateResponse {
    pub value: i16,
    pub likes: i64,
    pub dislikes: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A comment with its author and, for top-level comments, its replies
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub text: String,
    pub pinned: bool,
    pub likes_count: i64,
    pub viewer_liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub replies: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// Comment like state after a toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub likes: i64,
}

/// Pinned state after a toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommentPinResponse {
    pub pinned: bool,
}

// ============================================================================
// Subscription Responses
// ============================================================================

/// Subscription state after a toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubscriptionResponse {
    pub subscribed: bool,
    pub subscribers: i64,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// A notification joined with display data about who triggered it
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub origin_id: String,
    pub origin_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Unread notification badge count
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "degraded" },
            checks: HealthChecks {
                database: if database_healthy { "ok" } else { "unavailable" },
            },
        }
    }
}

/// Individual dependency check results
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
}
