//! Report database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reports table
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: i64,
    pub reporter_id: i64,
    pub video_id: i64,
    pub reason: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
