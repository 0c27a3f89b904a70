//! Reaction entity and the like/dislike transition rules
//!
//! The reaction ledger is the source of truth for a video's `likes_count` and
//! `dislikes_count`. Every state change goes through [`transition`], which
//! maps (current, desired) to exactly one ledger operation plus the counter
//! deltas that keep the aggregates in sync with the ledger.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Reaction kind - the value a user can attach to a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Wire/storage encoding: 1 = like, -1 = dislike
    #[inline]
    pub const fn value(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    /// Decode from the wire/storage encoding; 0 (or anything else) means
    /// "no reaction" and yields `None`.
    #[inline]
    pub const fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Like),
            -1 => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// Reaction ledger entry - at most one per (user, video)
///
/// Absence of a row means "no reaction"; there is no stored neutral state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: Snowflake,
    pub video_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(user_id: Snowflake, video_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            user_id,
            video_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// The single ledger write a transition requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    /// Insert a new reaction row with this kind
    Insert(ReactionKind),
    /// Flip the existing row to this kind
    Update(ReactionKind),
    /// Delete the existing row
    Delete,
    /// Leave the ledger untouched
    Keep,
}

/// Outcome of applying a desired reaction to the current ledger state
///
/// Negative deltas are applied with a floor at zero; the floor is a defensive
/// clamp against ledger drift and never fires under correct operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub ledger: LedgerOp,
    pub likes_delta: i64,
    pub dislikes_delta: i64,
    /// The user's reaction state after the transition
    pub state: Option<ReactionKind>,
}

/// Compute the transition for `SetReaction(current -> desired)`.
///
/// Resubmitting the current kind toggles it OFF (the like-button undo), it is
/// not a no-op. Switching kinds moves one unit from one counter to the other.
pub const fn transition(
    current: Option<ReactionKind>,
    desired: Option<ReactionKind>,
) -> Transition {
    match (current, desired) {
        (None, None) => Transition {
            ledger: LedgerOp::Keep,
            likes_delta: 0,
            dislikes_delta: 0,
            state: None,
        },
        (None, Some(kind)) => Transition {
            ledger: LedgerOp::Insert(kind),
            likes_delta: match kind {
                ReactionKind::Like => 1,
                ReactionKind::Dislike => 0,
            },
            dislikes_delta: match kind {
                ReactionKind::Like => 0,
                ReactionKind::Dislike => 1,
            },
            state: Some(kind),
        },
        (Some(old), Some(new)) if old as u8 != new as u8 => Transition {
            ledger: LedgerOp::Update(new),
            likes_delta: match new {
                ReactionKind::Like => 1,
                ReactionKind::Dislike => -1,
            },
            dislikes_delta: match new {
                ReactionKind::Like => -1,
                ReactionKind::Dislike => 1,
            },
            state: Some(new),
        },
        // Same kind resubmitted, or explicit clear: remove the row
        (Some(old), _) => Transition {
            ledger: LedgerOp::Delete,
            likes_delta: match old {
                ReactionKind::Like => -1,
                ReactionKind::Dislike => 0,
            },
            dislikes_delta: match old {
                ReactionKind::Like => 0,
                ReactionKind::Dislike => -1,
            },
            state: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReactionKind::{Dislike, Like};

    #[test]
    fn value_encoding_roundtrip() {
        assert_eq!(ReactionKind::from_value(Like.value()), Some(Like));
        assert_eq!(ReactionKind::from_value(Dislike.value()), Some(Dislike));
        assert_eq!(ReactionKind::from_value(0), None);
        assert_eq!(ReactionKind::from_value(7), None);
    }

    #[test]
    fn none_to_like_inserts_and_counts() {
        let t = transition(None, Some(Like));
        assert_eq!(t.ledger, LedgerOp::Insert(Like));
        assert_eq!((t.likes_delta, t.dislikes_delta), (1, 0));
        assert_eq!(t.state, Some(Like));
    }

    #[test]
    fn none_to_dislike_inserts_and_counts() {
        let t = transition(None, Some(Dislike));
        assert_eq!(t.ledger, LedgerOp::Insert(Dislike));
        assert_eq!((t.likes_delta, t.dislikes_delta), (0, 1));
        assert_eq!(t.state, Some(Dislike));
    }

    #[test]
    fn none_to_none_is_noop() {
        let t = transition(None, None);
        assert_eq!(t.ledger, LedgerOp::Keep);
        assert_eq!((t.likes_delta, t.dislikes_delta), (0, 0));
        assert_eq!(t.state, None);
    }

    #[test]
    fn resubmitting_same_kind_toggles_off() {
        let t = transition(Some(Like), Some(Like));
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!((t.likes_delta, t.dislikes_delta), (-1, 0));
        assert_eq!(t.state, None);

        let t = transition(Some(Dislike), Some(Dislike));
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!((t.likes_delta, t.dislikes_delta), (0, -1));
        assert_eq!(t.state, None);
    }

    #[test]
    fn explicit_clear_deletes() {
        let t = transition(Some(Like), None);
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!((t.likes_delta, t.dislikes_delta), (-1, 0));

        let t = transition(Some(Dislike), None);
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!((t.likes_delta, t.dislikes_delta), (0, -1));
    }

    #[test]
    fn switching_kind_moves_one_unit() {
        let t = transition(Some(Like), Some(Dislike));
        assert_eq!(t.ledger, LedgerOp::Update(Dislike));
        assert_eq!((t.likes_delta, t.dislikes_delta), (-1, 1));
        assert_eq!(t.state, Some(Dislike));

        let t = transition(Some(Dislike), Some(Like));
        assert_eq!(t.ledger, LedgerOp::Update(Like));
        assert_eq!((t.likes_delta, t.dislikes_delta), (1, -1));
        assert_eq!(t.state, Some(Like));
    }

    #[test]
    fn double_toggle_returns_to_origin() {
        // Toggle-off law: like twice nets out to no reaction and zero delta
        let first = transition(None, Some(Like));
        let second = transition(first.state, Some(Like));
        assert_eq!(second.state, None);
        assert_eq!(first.likes_delta + second.likes_delta, 0);
        assert_eq!(first.dislikes_delta + second.dislikes_delta, 0);
    }

    #[test]
    fn sum_consistency_over_random_sequences() {
        // Replaying any sequence of desires through the table keeps the
        // aggregate equal to the count of users whose last state is that kind.
        let sequences: &[&[Option<ReactionKind>]] = &[
            &[Some(Like), Some(Dislike), Some(Dislike)],
            &[Some(Like), Some(Like), Some(Like)],
            &[Some(Dislike), None, Some(Like)],
            &[None, Some(Dislike), Some(Like), Some(Like)],
        ];

        for seq in sequences {
            let mut state = None;
            let mut likes = 0i64;
            let mut dislikes = 0i64;
            for desired in *seq {
                let t = transition(state, *desired);
                state = t.state;
                likes = (likes + t.likes_delta).max(0);
                dislikes = (dislikes + t.dislikes_delta).max(0);
            }
            assert_eq!(likes, i64::from(state == Some(Like)));
            assert_eq!(dislikes, i64::from(state == Some(Dislike)));
        }
    }
}
