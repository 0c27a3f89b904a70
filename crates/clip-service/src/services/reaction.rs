//! Reaction service
//!
//! Applies like/dislike state to videos through the transactional ledger.

use clip_core::{DomainError, ReactionKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::ReactionStateResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the caller's reaction to a video.
    ///
    /// `value` is 1 for like, -1 for dislike, 0 to clear. Resubmitting the
    /// current value toggles it off. Returns the caller's state and both
    /// counters after the write.
    #[instrument(skip(self))]
    pub async fn set(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
        value: i16,
    ) -> ServiceResult<ReactionStateResponse> {
        let desired = match value {
            0 => None,
            v => Some(ReactionKind::from_value(v).ok_or(DomainError::InvalidReactionValue(v))?),
        };

        let snapshot = self
            .ctx
            .reaction_repo()
            .set(user_id, video_id, desired)
            .await?;

        info!(
            user_id = %user_id,
            video_id = %video_id,
            value = snapshot.state.map_or(0, |kind| kind.value()),
            "Reaction applied"
        );

        Ok(ReactionStateResponse::from(snapshot))
    }
}
