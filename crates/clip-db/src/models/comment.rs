//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub video_id: i64,
    pub author_id: i64,
    pub text: String,
    pub parent_id: Option<i64>,
    pub pinned: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with the requesting viewer's like state
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithViewerModel {
    pub id: i64,
    pub video_id: i64,
    pub author_id: i64,
    pub text: String,
    pub parent_id: Option<i64>,
    pub pinned: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub viewer_liked: bool,
}
