//! User entity - an account that both watches and publishes videos

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// A user doubles as a channel: other users subscribe to it and its uploads
/// show up in their feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Minimum username length accepted at registration
    pub const MIN_USERNAME_LEN: usize = 3;

    /// Create a new User with fresh timestamps
    pub fn new(id: Snowflake, username: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            display_name,
            avatar: None,
            bio: None,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
