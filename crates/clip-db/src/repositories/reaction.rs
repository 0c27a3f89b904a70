//! PostgreSQL implementation of ReactionRepository
//!
//! `set` is the engagement engine's hot path: one transaction locks the
//! video row, reads the caller's ledger row, applies the transition computed
//! in clip-core, and adjusts both counters with a zero floor.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clip_core::entities::reaction::{transition, LedgerOp};
use clip_core::entities::ReactionKind;
use clip_core::error::DomainError;
use clip_core::traits::{ReactionRepository, ReactionSnapshot, RepoResult};
use clip_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> RepoResult<Option<ReactionKind>> {
        let value = sqlx::query_scalar::<_, i16>(
            r#"
            SELECT value FROM reactions WHERE user_id = $1 AND video_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(value.and_then(ReactionKind::from_value))
    }

    #[instrument(skip(self, video_ids))]
    async fn find_many(
        &self,
        user_id: Snowflake,
        video_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionKind)>> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = video_ids.iter().map(|id| id.into_inner()).collect();

        let rows = sqlx::query_as::<_, (i64, i16)>(
            r#"
            SELECT video_id, value FROM reactions
            WHERE user_id = $1 AND video_id = ANY($2)
            "#,
        )
        .bind(user_id.into_inner())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(video_id, value)| {
                ReactionKind::from_value(value).map(|kind| (Snowflake::new(video_id), kind))
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn set(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
        desired: Option<ReactionKind>,
    ) -> RepoResult<ReactionSnapshot> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the video row; all reaction writes for one video serialize
        // here, which also closes the duplicate-insert race on the ledger.
        let video_exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM videos WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if video_exists.is_none() {
            return Err(DomainError::VideoNotFound(video_id));
        }

        let current = sqlx::query_scalar::<_, i16>(
            r#"
            SELECT value FROM reactions WHERE user_id = $1 AND video_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .and_then(ReactionKind::from_value);

        let t = transition(current, desired);

        match t.ledger {
            LedgerOp::Insert(kind) => {
                sqlx::query(
                    r#"
                    INSERT INTO reactions (user_id, video_id, value, created_at)
                    VALUES ($1, $2, $3, NOW())
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(video_id.into_inner())
                .bind(kind.value())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            LedgerOp::Update(kind) => {
                sqlx::query(
                    r#"
                    UPDATE reactions SET value = $3, created_at = NOW()
                    WHERE user_id = $1 AND video_id = $2
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(video_id.into_inner())
                .bind(kind.value())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            LedgerOp::Delete => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions WHERE user_id = $1 AND video_id = $2
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(video_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            LedgerOp::Keep => {}
        }

        let (likes, dislikes) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            UPDATE videos
            SET likes_count = GREATEST(0, likes_count + $2),
                dislikes_count = GREATEST(0, dislikes_count + $3)
            WHERE id = $1
            RETURNING likes_count, dislikes_count
            "#,
        )
        .bind(video_id.into_inner())
        .bind(t.likes_delta)
        .bind(t.dislikes_delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ReactionSnapshot {
            state: t.state,
            likes,
            dislikes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }
}
