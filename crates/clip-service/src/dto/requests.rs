//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user profile request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

// ============================================================================
// Video Requests
// ============================================================================

/// Video upload metadata, assembled from multipart form fields.
///
/// Oversized text fields are truncated at upload, not rejected.
#[derive(Debug, Clone, Default, Validate)]
pub struct UploadVideoRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: String,

    pub tags: String,

    /// Duration in seconds, as reported by the client
    pub duration: f64,

    pub quality: Option<String>,

    pub is_short: bool,
}

/// An uploaded file's bytes plus its client-side filename
#[derive(Clone)]
pub struct FilePayload {
    pub data: Vec<u8>,
    pub filename: String,
}

impl std::fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePayload")
            .field("filename", &self.filename)
            .field("bytes", &self.data.len())
            .finish()
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Post a comment or a reply
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,

    /// Parent comment ID (Snowflake as string) when replying
    pub parent_id: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Set the caller's reaction to a video.
///
/// `value` is 1 for like, -1 for dislike, 0 to clear. Resubmitting the
/// current value also clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SetReactionRequest {
    pub value: i16,
}

// ============================================================================
// Report Requests
// ============================================================================

/// File a report against a video
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(min = 1, max = 100, message = "Reason must be 1-100 characters"))]
    pub reason: String,

    #[validate(length(max = 1000, message = "Details must be at most 1000 characters"))]
    pub details: Option<String>,
}
