//! Notification entity - per-user inbox entries written by engagement fan-out

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// What triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Someone commented on the recipient's video
    Comment,
    /// Someone subscribed to the recipient's channel
    Subscribe,
}

impl NotificationKind {
    /// Storage/wire encoding
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Subscribe => "subscribe",
        }
    }

    /// Decode from the storage encoding
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "comment" => Some(Self::Comment),
            "subscribe" => Some(Self::Subscribe),
            _ => None,
        }
    }
}

/// Notification entity
///
/// Written only as a side effect of other mutations, inside the same
/// transaction. A user never receives a notification about their own action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub origin_id: Snowflake,
    pub kind: NotificationKind,
    pub video_id: Option<Snowflake>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        origin_id: Snowflake,
        kind: NotificationKind,
        video_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            origin_id,
            kind,
            video_id,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Self-notifications are suppressed at fan-out time
    #[inline]
    pub fn is_self_directed(&self) -> bool {
        self.recipient_id == self.origin_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_encoding_roundtrip() {
        assert_eq!(NotificationKind::from_str("comment"), Some(NotificationKind::Comment));
        assert_eq!(NotificationKind::from_str("subscribe"), Some(NotificationKind::Subscribe));
        assert_eq!(NotificationKind::from_str("unknown"), None);
        assert_eq!(NotificationKind::Comment.as_str(), "comment");
    }

    #[test]
    fn detects_self_directed() {
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(7),
            Snowflake::new(7),
            NotificationKind::Subscribe,
            None,
        );
        assert!(n.is_self_directed());
        assert!(!n.read);
    }
}
