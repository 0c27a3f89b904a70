//! Subscription entity - membership of a subscriber in a channel's audience

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Subscription entity - key is (subscriber, channel)
///
/// Existence means the channel's uploads appear in the subscriber's feed and
/// the channel's subscriber count includes this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub subscriber_id: Snowflake,
    pub channel_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new Subscription
    pub fn new(subscriber_id: Snowflake, channel_id: Snowflake) -> Self {
        Self {
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        }
    }

    /// Self-subscriptions are rejected before they reach storage
    #[inline]
    pub fn is_self_subscription(&self) -> bool {
        self.subscriber_id == self.channel_id
    }
}
