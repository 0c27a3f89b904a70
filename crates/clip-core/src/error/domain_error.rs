//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Video not found: {0}")]
    VideoNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Comment text is empty")]
    EmptyCommentText,

    #[error("Cannot subscribe to your own channel")]
    SelfSubscription,

    #[error("Invalid reaction value: {0}")]
    InvalidReactionValue(i16),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the video owner")]
    NotVideoOwner,

    #[error("Not the comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Object storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::VideoNotFound(_) => "UNKNOWN_VIDEO",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::EmptyCommentText => "EMPTY_COMMENT",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::InvalidReactionValue(_) => "INVALID_REACTION_VALUE",

            // Authorization
            Self::NotVideoOwner => "NOT_VIDEO_OWNER",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_UPLOAD_FAILED",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::VideoNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::EmptyCommentText
                | Self::SelfSubscription
                | Self::InvalidReactionValue(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotVideoOwner | Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(DomainError::VideoNotFound(Snowflake::new(1)).code(), "UNKNOWN_VIDEO");
        assert_eq!(DomainError::SelfSubscription.code(), "SELF_SUBSCRIPTION");
        assert_eq!(DomainError::NotVideoOwner.code(), "NOT_VIDEO_OWNER");
    }

    #[test]
    fn classification() {
        assert!(DomainError::CommentNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::EmptyCommentText.is_validation());
        assert!(DomainError::SelfSubscription.is_validation());
        assert!(DomainError::NotCommentAuthor.is_authorization());
        assert!(DomainError::UsernameTaken.is_conflict());
        assert!(!DomainError::DatabaseError("x".into()).is_not_found());
    }

    #[test]
    fn display_messages() {
        let err = DomainError::UserNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "User not found: 123");
        assert_eq!(
            DomainError::SelfSubscription.to_string(),
            "Cannot subscribe to your own channel"
        );
    }
}
