//! PostgreSQL implementation of CommentRepository
//!
//! Posting, pinning, liking, and deleting all run inside one transaction so
//! the comment tree, the video's comment counter, and the notification inbox
//! never drift apart.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clip_core::entities::{Comment, Notification, NotificationKind};
use clip_core::error::DomainError;
use clip_core::traits::{CommentRepository, CommentThread, LikeSnapshot, RepoResult};
use clip_core::value_objects::{Snowflake, SnowflakeGenerator};

use crate::models::{CommentModel, CommentWithViewerModel};

use super::error::map_db_error;
use super::notify::insert_notification;

/// Oldest replies carried per thread when listing
const MAX_REPLIES_PER_THREAD: i64 = 20;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    ///
    /// The generator mints IDs for notification rows written during fan-out.
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, video_id, author_id, text, parent_id, pinned, likes_count, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, video_id = %comment.video_id))]
    async fn post(&self, comment: &Comment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the video row so the counter bump serializes with other
        // comment writes and video deletion.
        let owner_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT owner_id FROM videos WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(comment.video_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::VideoNotFound(comment.video_id))?;

        if let Some(parent_id) = comment.parent_id {
            let parent = sqlx::query_as::<_, (i64, Option<i64>)>(
                r#"
                SELECT video_id, parent_id FROM comments WHERE id = $1
                "#,
            )
            .bind(parent_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or(DomainError::CommentNotFound(parent_id))?;

            if parent.0 != comment.video_id.into_inner() {
                return Err(DomainError::ValidationError(
                    "Parent comment belongs to a different video".to_string(),
                ));
            }
            // Replies attach only to top-level comments; the tree is two levels deep
            if parent.1.is_some() {
                return Err(DomainError::ValidationError(
                    "Cannot reply to a reply".to_string(),
                ));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO comments (id, video_id, author_id, text, parent_id, pinned,
                                  likes_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.video_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.text)
        .bind(comment.parent_id.map(Snowflake::into_inner))
        .bind(comment.pinned)
        .bind(comment.likes_count)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Only top-level comments count toward the video aggregate
        if comment.parent_id.is_none() {
            sqlx::query(
                r#"
                UPDATE videos SET comments_count = comments_count + 1 WHERE id = $1
                "#,
            )
            .bind(comment.video_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        // Only top-level comments notify the owner; replies are silent
        if comment.parent_id.is_none() {
            let notification = Notification::new(
                self.ids.generate(),
                Snowflake::new(owner_id),
                comment.author_id,
                NotificationKind::Comment,
                Some(comment.video_id),
            );
            insert_notification(&mut tx, &notification)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_top_level(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<CommentThread>> {
        let limit = limit.clamp(1, 100);
        let viewer_id = viewer.map_or(0, Snowflake::into_inner);

        let top_level = sqlx::query_as::<_, CommentWithViewerModel>(
            r#"
            SELECT c.id, c.video_id, c.author_id, c.text, c.parent_id, c.pinned,
                   c.likes_count, c.created_at,
                   EXISTS(SELECT 1 FROM comment_likes cl
                          WHERE cl.comment_id = c.id AND cl.user_id = $2) AS viewer_liked
            FROM comments c
            WHERE c.video_id = $1 AND c.parent_id IS NULL
            ORDER BY c.pinned DESC, c.likes_count DESC, c.created_at DESC
            LIMIT $3
            "#,
        )
        .bind(video_id.into_inner())
        .bind(viewer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if top_level.is_empty() {
            return Ok(Vec::new());
        }

        let parent_ids: Vec<i64> = top_level.iter().map(|c| c.id).collect();

        let replies = sqlx::query_as::<_, CommentWithViewerModel>(
            r#"
            SELECT id, video_id, author_id, text, parent_id, pinned,
                   likes_count, created_at, viewer_liked
            FROM (
                SELECT c.id, c.video_id, c.author_id, c.text, c.parent_id, c.pinned,
                       c.likes_count, c.created_at,
                       EXISTS(SELECT 1 FROM comment_likes cl
                              WHERE cl.comment_id = c.id AND cl.user_id = $2) AS viewer_liked,
                       ROW_NUMBER() OVER (PARTITION BY c.parent_id
                                          ORDER BY c.created_at ASC) AS reply_rank
                FROM comments c
                WHERE c.parent_id = ANY($1)
            ) ranked
            WHERE reply_rank <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(&parent_ids)
        .bind(viewer_id)
        .bind(MAX_REPLIES_PER_THREAD)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut threads: Vec<CommentThread> = top_level
            .into_iter()
            .map(|model| {
                let viewer_liked = model.viewer_liked;
                CommentThread {
                    comment: Comment::from(model),
                    viewer_liked,
                    replies: Vec::new(),
                }
            })
            .collect();

        for model in replies {
            let parent = model.parent_id;
            let viewer_liked = model.viewer_liked;
            let reply = CommentThread {
                comment: Comment::from(model),
                viewer_liked,
                replies: Vec::new(),
            };
            if let Some(thread) = threads
                .iter_mut()
                .find(|t| Some(t.comment.id.into_inner()) == parent)
            {
                thread.replies.push(reply);
            }
        }

        Ok(threads)
    }

    #[instrument(skip(self))]
    async fn toggle_like(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> RepoResult<LikeSnapshot> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the comment row; the like ledger and counter move together
        let exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM comments WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(comment_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if exists.is_none() {
            return Err(DomainError::CommentNotFound(comment_id));
        }

        let removed = sqlx::query(
            r#"
            DELETE FROM comment_likes WHERE user_id = $1 AND comment_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(comment_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let liked = if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO comment_likes (user_id, comment_id, created_at)
                VALUES ($1, $2, NOW())
                "#,
            )
            .bind(user_id.into_inner())
            .bind(comment_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            true
        } else {
            false
        };

        let delta: i64 = if liked { 1 } else { -1 };
        let likes = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE comments SET likes_count = GREATEST(0, likes_count + $2)
            WHERE id = $1
            RETURNING likes_count
            "#,
        )
        .bind(comment_id.into_inner())
        .bind(delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LikeSnapshot { liked, likes })
    }

    #[instrument(skip(self))]
    async fn toggle_pin(&self, comment_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row = sqlx::query_as::<_, (i64, Option<i64>, bool)>(
            r#"
            SELECT video_id, parent_id, pinned FROM comments WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(comment_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::CommentNotFound(comment_id))?;

        let (video_id, parent_id, pinned) = row;

        if parent_id.is_some() {
            return Err(DomainError::ValidationError(
                "Only top-level comments can be pinned".to_string(),
            ));
        }

        let new_state = if pinned {
            sqlx::query(
                r#"
                UPDATE comments SET pinned = FALSE WHERE id = $1
                "#,
            )
            .bind(comment_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            false
        } else {
            // At most one pinned comment per video
            sqlx::query(
                r#"
                UPDATE comments SET pinned = FALSE WHERE video_id = $1 AND pinned
                "#,
            )
            .bind(video_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            sqlx::query(
                r#"
                UPDATE comments SET pinned = TRUE WHERE id = $1
                "#,
            )
            .bind(comment_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            true
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(new_state)
    }

    #[instrument(skip(self))]
    async fn delete(&self, comment_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row = sqlx::query_as::<_, (i64, Option<i64>)>(
            r#"
            SELECT video_id, parent_id FROM comments WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(comment_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::CommentNotFound(comment_id))?;

        let (video_id, parent_id) = row;

        // FK cascade removes replies together with their parent
        sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1
            "#,
        )
        .bind(comment_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Replies never counted toward the aggregate, so only a top-level
        // delete moves it
        if parent_id.is_none() {
            sqlx::query(
                r#"
                UPDATE videos SET comments_count = GREATEST(0, comments_count - 1)
                WHERE id = $1
                "#,
            )
            .bind(video_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
