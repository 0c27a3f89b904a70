//! Test fixtures and data generators
//!
//! Provides reusable wire types and unique test data for integration
//! tests. These mirror the API's JSON contracts without depending on
//! the server crates' internal DTOs.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            display_name: format!("Test User {suffix}"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// User response (also covers the current-user shape; optional fields
/// are omitted from the wire when absent)
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub verified: bool,
    #[serde(default)]
    pub unread: i64,
    pub created_at: String,
}

/// Profile update request
#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Channel response
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub subscribers: i64,
    pub videos: i64,
    pub total_views: i64,
    pub subscribed: bool,
}

/// Video response; the detail endpoint additionally carries the channel
/// subscriber count and the viewer's reaction and subscription state
#[derive(Debug, Deserialize)]
pub struct VideoResponse {
    pub id: String,
    pub title: String,
    pub views: i64,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments_count: i64,
    #[serde(default)]
    pub author: Option<UserResponse>,
    #[serde(default)]
    pub channel_subs: i64,
    #[serde(default)]
    pub user_liked: i16,
    #[serde(default)]
    pub user_subscribed: bool,
}

/// View counter response
#[derive(Debug, Deserialize)]
pub struct ViewCountResponse {
    pub views: i64,
}

/// Share counter response
#[derive(Debug, Deserialize)]
pub struct ShareCountResponse {
    pub shares: i64,
}

/// Watch-later toggle response
#[derive(Debug, Deserialize)]
pub struct WatchLaterResponse {
    pub saved: bool,
}

/// Reaction request (1 like, -1 dislike, 0 clear)
#[derive(Debug, Serialize)]
pub struct SetReactionRequest {
    pub value: i16,
}

/// Reaction state response
#[derive(Debug, Deserialize)]
pub struct ReactionStateResponse {
    pub value: i16,
    pub likes: i64,
    pub dislikes: i64,
}

/// Comment creation request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn simple(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parent_id: None,
        }
    }

    pub fn reply(text: &str, parent_id: &str) -> Self {
        Self {
            text: text.to_string(),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub text: String,
    pub pinned: bool,
    pub likes_count: i64,
    pub viewer_liked: bool,
    #[serde(default)]
    pub author: Option<UserResponse>,
    pub replies: Vec<CommentResponse>,
    pub created_at: String,
}

/// Comment like toggle response
#[derive(Debug, Deserialize)]
pub struct CommentLikeResponse {
    pub liked: bool,
    pub likes: i64,
}

/// Comment pin toggle response
#[derive(Debug, Deserialize)]
pub struct CommentPinResponse {
    pub pinned: bool,
}

/// Subscription toggle response
#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    pub subscribed: bool,
    pub subscribers: i64,
}

/// Notification response
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub origin_id: String,
    pub origin_username: String,
    #[serde(default)]
    pub video_id: Option<String>,
    pub read: bool,
    pub created_at: String,
}

/// Unread badge response
#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// Report creation request
#[derive(Debug, Serialize)]
pub struct CreateReportRequest {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CreateReportRequest {
    pub fn spam() -> Self {
        Self {
            reason: "spam".to_string(),
            details: Some("Repeated promotional content".to_string()),
        }
    }
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
