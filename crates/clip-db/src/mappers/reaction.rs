//! Reaction entity <-> model mapper

use clip_core::entities::{Reaction, ReactionKind};
use clip_core::error::DomainError;
use clip_core::value_objects::Snowflake;

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = ReactionKind::from_value(model.value)
            .ok_or(DomainError::InvalidReactionValue(model.value))?;

        Ok(Reaction {
            user_id: Snowflake::new(model.user_id),
            video_id: Snowflake::new(model.video_id),
            kind,
            created_at: model.created_at,
        })
    }
}
