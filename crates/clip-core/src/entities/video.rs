//! Video entity - an upload plus its denormalized engagement counters

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Video entity
///
/// The counter fields (`views`, `likes_count`, `dislikes_count`,
/// `comments_count`, `shares`) are denormalized aggregates. They are only
/// ever mutated by the engagement operations, atomically with the ledger row
/// they summarize, and are floored at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Snowflake,
    pub owner_id: Snowflake,
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

impl Video {
    /// Maximum stored title length (longer input is truncated, not rejected)
    pub const MAX_TITLE_LEN: usize = 200;
    /// Maximum stored description length
    pub const MAX_DESCRIPTION_LEN: usize = 5000;
    /// Maximum stored tags length
    pub const MAX_TAGS_LEN: usize = 500;

    /// Create a new Video with all counters at zero
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        title: String,
        description: String,
        tags: String,
        video_url: String,
        thumbnail_url: Option<String>,
        duration: f64,
        quality: String,
        is_short: bool,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            tags,
            video_url,
            thumbnail_url,
            duration,
            quality,
            is_short,
            views: 0,
            likes_count: 0,
            dislikes_count: 0,
            comments_count: 0,
            shares: 0,
            created_at: Utc::now(),
        }
    }

    /// Check whether the given user owns this video
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Video {
        Video::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "title".into(),
            String::new(),
            String::new(),
            "https://cdn.example/v.mp4".into(),
            None,
            12.5,
            "720p".into(),
            false,
        )
    }

    #[test]
    fn new_video_has_zero_counters() {
        let v = sample();
        assert_eq!(v.views, 0);
        assert_eq!(v.likes_count, 0);
        assert_eq!(v.dislikes_count, 0);
        assert_eq!(v.comments_count, 0);
        assert_eq!(v.shares, 0);
    }

    #[test]
    fn ownership_check() {
        let v = sample();
        assert!(v.is_owned_by(Snowflake::new(1)));
        assert!(!v.is_owned_by(Snowflake::new(2)));
    }
}
