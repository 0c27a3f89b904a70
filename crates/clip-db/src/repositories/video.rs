//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use clip_core::entities::Video;
use clip_core::error::DomainError;
use clip_core::traits::{
    ChannelStats, CreatorStats, RepoResult, VideoQuery, VideoRepository, VideoSort,
};
use clip_core::value_objects::Snowflake;

use crate::models::VideoModel;

use super::error::map_db_error;

/// View count above which a video enters everyone's feed, subscribed or not
const FEED_POPULARITY_THRESHOLD: i64 = 100;

const VIDEO_COLUMNS: &str = "id, owner_id, title, description, tags, video_url, \
     thumbnail_url, duration, quality, is_short, views, likes_count, dislikes_count, \
     comments_count, shares, created_at";

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    /// Create a new PgVideoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let result = sqlx::query_as::<_, VideoModel>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, owner_id, title, description, tags, video_url,
                                thumbnail_url, duration, quality, is_short, views,
                                likes_count, dislikes_count, comments_count, shares,
                                created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(video.id.into_inner())
        .bind(video.owner_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.tags)
        .bind(&video.video_url)
        .bind(video.thumbnail_url.as_deref())
        .bind(video.duration)
        .bind(&video.quality)
        .bind(video.is_short)
        .bind(video.views)
        .bind(video.likes_count)
        .bind(video.dislikes_count)
        .bind(video.comments_count)
        .bind(video.shares)
        .bind(video.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: VideoQuery) -> RepoResult<Vec<Video>> {
        let limit = query.limit.clamp(1, 100);

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE TRUE"));

        if let Some(shorts) = query.shorts {
            builder.push(" AND is_short = ").push_bind(shorts);
        }

        if let Some(channel_id) = query.channel_id {
            builder
                .push(" AND owner_id = ")
                .push_bind(channel_id.into_inner());
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR tags ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        match query.sort {
            VideoSort::Latest => builder.push(" ORDER BY created_at DESC"),
            VideoSort::Popular => builder.push(" ORDER BY views DESC, created_at DESC"),
            VideoSort::Trending => {
                builder.push(" ORDER BY views * 2 + likes_count DESC, created_at DESC")
            }
        };

        builder.push(" LIMIT ").push_bind(limit);

        let results = builder
            .build_query_as::<VideoModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, video_id: Snowflake, viewer: Option<Snowflake>) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Every call counts, repeats included
        let views = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING views
            "#,
        )
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::VideoNotFound(video_id))?;

        if let Some(viewer_id) = viewer {
            sqlx::query(
                r#"
                INSERT INTO watch_history (user_id, video_id, watched_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = NOW()
                "#,
            )
            .bind(viewer_id.into_inner())
            .bind(video_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(views)
    }

    #[instrument(skip(self))]
    async fn feed(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, VideoModel>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS} FROM videos v
            WHERE v.views > $3
               OR EXISTS(
                    SELECT 1 FROM subscriptions s
                    WHERE s.subscriber_id = $1 AND s.channel_id = v.owner_id
               )
            ORDER BY v.created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id.into_inner())
        .bind(limit)
        .bind(FEED_POPULARITY_THRESHOLD)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self))]
    async fn history(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, VideoModel>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS} FROM videos v
            JOIN watch_history h ON h.video_id = v.id
            WHERE h.user_id = $1
            ORDER BY h.watched_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self))]
    async fn watch_later(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Video>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, VideoModel>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS} FROM videos v
            JOIN watch_later w ON w.video_id = v.id
            WHERE w.user_id = $1
            ORDER BY w.saved_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self))]
    async fn toggle_watch_later(
        &self,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM videos WHERE id = $1
            "#,
        )
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if exists.is_none() {
            return Err(DomainError::VideoNotFound(video_id));
        }

        let removed = sqlx::query(
            r#"
            DELETE FROM watch_later WHERE user_id = $1 AND video_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let saved = if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO watch_later (user_id, video_id, saved_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (user_id, video_id) DO NOTHING
                "#,
            )
            .bind(user_id.into_inner())
            .bind(video_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            true
        } else {
            false
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn add_share(&self, video_id: Snowflake) -> RepoResult<i64> {
        let shares = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE videos SET shares = shares + 1 WHERE id = $1 RETURNING shares
            "#,
        )
        .bind(video_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::VideoNotFound(video_id))?;

        Ok(shares)
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, video_id: Snowflake, owner_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let actual_owner = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT owner_id FROM videos WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::VideoNotFound(video_id))?;

        if actual_owner != owner_id.into_inner() {
            return Err(DomainError::NotVideoOwner);
        }

        // FK cascades remove reactions, comments, history, and notifications
        sqlx::query(
            r#"
            DELETE FROM videos WHERE id = $1
            "#,
        )
        .bind(video_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn channel_stats(&self, channel_id: Snowflake) -> RepoResult<ChannelStats> {
        let row = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1),
                (SELECT COUNT(*) FROM videos WHERE owner_id = $1),
                (SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1)
            "#,
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ChannelStats {
            subscribers: row.0,
            videos: row.1,
            total_views: row.2,
        })
    }

    #[instrument(skip(self))]
    async fn creator_stats(&self, user_id: Snowflake) -> RepoResult<CreatorStats> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM videos WHERE owner_id = $1),
                (SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1),
                (SELECT COALESCE(SUM(likes_count), 0)::BIGINT FROM videos WHERE owner_id = $1),
                (SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1)
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(CreatorStats {
            total_videos: row.0,
            total_views: row.1,
            total_likes: row.2,
            subscribers: row.3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgVideoRepository>();
    }
}
