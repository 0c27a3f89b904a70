//! Comment entity - two-level comment tree (top-level + single-depth replies)

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum stored comment length in characters; longer text is silently
/// truncated, matching the platform's historical behavior.
pub const MAX_COMMENT_LEN: usize = 1000;

/// Comment entity
///
/// `parent_id` is `None` for top-level comments and `Some` for replies.
/// Replies never parent further replies, and only top-level comments may be
/// pinned or counted in the video's `comments_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub parent_id: Option<Snowflake>,
    pub pinned: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(id: Snowflake, video_id: Snowflake, author_id: Snowflake, text: String) -> Self {
        Self {
            id,
            video_id,
            author_id,
            text,
            parent_id: None,
            pinned: false,
            likes_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a reply to an existing top-level comment
    pub fn new_reply(
        id: Snowflake,
        video_id: Snowflake,
        author_id: Snowflake,
        text: String,
        parent_id: Snowflake,
    ) -> Self {
        Self {
            id,
            video_id,
            author_id,
            text,
            parent_id: Some(parent_id),
            pinned: false,
            likes_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Check if this comment is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if this comment may carry the pinned flag
    #[inline]
    pub fn is_pinnable(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Normalize raw comment text: trim whitespace, reject empty input, and
/// truncate to [`MAX_COMMENT_LEN`] characters.
///
/// Returns `None` when the trimmed text is empty.
pub fn normalize_comment_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() <= MAX_COMMENT_LEN {
        return Some(trimmed.to_string());
    }
    Some(trimmed.chars().take(MAX_COMMENT_LEN).collect())
}
