//! Notification database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: i64,
    pub origin_id: i64,
    pub kind: String,
    pub video_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification row joined with origin and video display data
#[derive(Debug, Clone, FromRow)]
pub struct NotificationViewModel {
    pub id: i64,
    pub recipient_id: i64,
    pub origin_id: i64,
    pub kind: String,
    pub video_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub origin_username: String,
    pub origin_avatar: Option<String>,
    pub video_title: Option<String>,
}
