//! Reaction ledger database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions ledger table
///
/// `value` is 1 for a like and -1 for a dislike; no row means no reaction.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: i64,
    pub video_id: i64,
    pub value: i16,
    pub created_at: DateTime<Utc>,
}
