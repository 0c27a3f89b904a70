//! Video database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for videos table
///
/// Counter columns are floored at zero by the SQL that mutates them.
#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: f64,
    pub quality: String,
    pub is_short: bool,
    pub views: i64,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments_count: i64,
    pub shares: i64,
    pub created_at: DateTime<Utc>,
}
