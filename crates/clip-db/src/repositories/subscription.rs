//! PostgreSQL implementation of SubscriptionRepository

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clip_core::entities::{Notification, NotificationKind, User};
use clip_core::error::DomainError;
use clip_core::traits::{RepoResult, SubscriptionRepository};
use clip_core::value_objects::{Snowflake, SnowflakeGenerator};

use crate::models::UserModel;

use super::error::map_db_error;
use super::notify::insert_notification;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn toggle(&self, subscriber_id: Snowflake, channel_id: Snowflake) -> RepoResult<bool> {
        if subscriber_id == channel_id {
            return Err(DomainError::SelfSubscription);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the channel's user row so toggle races serialize per channel
        let channel_exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM users WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(channel_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if channel_exists.is_none() {
            return Err(DomainError::UserNotFound(channel_id));
        }

        let removed = sqlx::query(
            r#"
            DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2
            "#,
        )
        .bind(subscriber_id.into_inner())
        .bind(channel_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let subscribed = if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO subscriptions (subscriber_id, channel_id, created_at)
                VALUES ($1, $2, NOW())
                "#,
            )
            .bind(subscriber_id.into_inner())
            .bind(channel_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            // Only a fresh subscription notifies; unsubscribing is silent
            let notification = Notification::new(
                self.ids.generate(),
                channel_id,
                subscriber_id,
                NotificationKind::Subscribe,
                None,
            );
            insert_notification(&mut tx, &notification)
                .await
                .map_err(map_db_error)?;
            true
        } else {
            false
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(subscribed)
    }

    #[instrument(skip(self))]
    async fn is_subscribed(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2
            )
            "#,
        )
        .bind(subscriber_id.into_inner())
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn count_for_channel(&self, channel_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1
            "#,
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn list_channels(&self, subscriber_id: Snowflake) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT u.id, u.username, u.display_name, u.password_hash, u.avatar, u.bio,
                   u.verified, u.created_at, u.updated_at
            FROM users u
            JOIN subscriptions s ON s.channel_id = u.id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(subscriber_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSubscriptionRepository>();
    }
}
