//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clip_core::traits::{NotificationRepository, NotificationView, RepoResult};
use clip_core::value_objects::Snowflake;

use crate::models::NotificationViewModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn list_and_mark_read(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<NotificationView>> {
        let limit = limit.clamp(1, 100);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, NotificationViewModel>(
            r#"
            SELECT n.id, n.recipient_id, n.origin_id, n.kind, n.video_id, n.read,
                   n.created_at,
                   u.username AS origin_username,
                   u.avatar AS origin_avatar,
                   v.title AS video_title
            FROM notifications n
            JOIN users u ON u.id = n.origin_id
            LEFT JOIN videos v ON v.id = n.video_id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(limit)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Reading the inbox clears the badge: every unread row flips, not
        // just the returned page
        sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE WHERE recipient_id = $1 AND NOT read
            "#,
        )
        .bind(recipient_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        rows.into_iter().map(NotificationView::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT read
            "#,
        )
        .bind(recipient_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}
