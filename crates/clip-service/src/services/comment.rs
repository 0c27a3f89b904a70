//! Comment service
//!
//! Posting, threaded listing, likes, pinning, and deletion. Moderation
//! rights: only the video owner pins; only the author deletes.

use std::collections::HashMap;

use clip_core::traits::CommentThread;
use clip_core::{normalize_comment_text, Comment, DomainError, Snowflake, User, Video};
use tracing::{info, instrument};

use crate::dto::{
    comment_thread_response, CommentLikeResponse, CommentPinResponse, CommentResponse,
    CreateCommentRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest comment page size
const MAX_COMMENT_LIMIT: i64 = 100;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment or a reply.
    ///
    /// Text is trimmed and truncated; empty text is rejected. A top-level
    /// comment notifies the video owner unless they authored it; replies
    /// notify nobody.
    #[instrument(skip(self, request))]
    pub async fn post(
        &self,
        author_id: Snowflake,
        video_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let text = normalize_comment_text(&request.text).ok_or(DomainError::EmptyCommentText)?;

        let comment = match request.parent_id.as_deref() {
            Some(raw) => {
                let parent_id = Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid parent comment ID"))?;
                Comment::new_reply(self.ctx.generate_id(), video_id, author_id, text, parent_id)
            }
            None => Comment::new(self.ctx.generate_id(), video_id, author_id, text),
        };

        self.ctx.comment_repo().post(&comment).await?;

        info!(
            comment_id = %comment.id,
            video_id = %video_id,
            reply = comment.is_reply(),
            "Comment posted"
        );

        let author = self.ctx.user_repo().find_by_id(author_id).await?;

        Ok(CommentResponse {
            id: comment.id.to_string(),
            video_id: comment.video_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            text: comment.text.clone(),
            pinned: comment.pinned,
            likes_count: comment.likes_count,
            viewer_liked: false,
            author: author.as_ref().map(UserResponse::from),
            replies: Vec::new(),
            created_at: comment.created_at,
        })
    }

    /// Threaded comments for a video, pinned first, then newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let threads = self
            .ctx
            .comment_repo()
            .list_top_level(video_id, viewer, limit.clamp(1, MAX_COMMENT_LIMIT))
            .await?;

        let mut author_ids = Vec::new();
        collect_author_ids(&threads, &mut author_ids);
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(threads
            .iter()
            .map(|thread| comment_thread_response(thread, &authors))
            .collect())
    }

    /// Toggle the caller's like on a comment
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<CommentLikeResponse> {
        let snapshot = self
            .ctx
            .comment_repo()
            .toggle_like(user_id, comment_id)
            .await?;
        Ok(CommentLikeResponse::from(snapshot))
    }

    /// Toggle the pinned flag. Only the video owner may pin; pinning unpins
    /// any other comment on the video.
    #[instrument(skip(self))]
    pub async fn toggle_pin(
        &self,
        actor_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<CommentPinResponse> {
        let (comment, video) = self.comment_with_video(comment_id).await?;

        if !video.is_owned_by(actor_id) {
            return Err(DomainError::NotVideoOwner.into());
        }

        let pinned = self.ctx.comment_repo().toggle_pin(comment.id).await?;

        info!(comment_id = %comment_id, pinned, "Comment pin toggled");

        Ok(CommentPinResponse { pinned })
    }

    /// Delete a comment and its replies. Only the author may delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, actor_id: Snowflake, comment_id: Snowflake) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if comment.author_id != actor_id {
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, actor_id = %actor_id, "Comment deleted");

        Ok(())
    }

    async fn comment_with_video(
        &self,
        comment_id: Snowflake,
    ) -> ServiceResult<(Comment, Video)> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        let video = self
            .ctx
            .video_repo()
            .find_by_id(comment.video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(comment.video_id))?;

        Ok((comment, video))
    }
}

fn collect_author_ids(threads: &[CommentThread], out: &mut Vec<Snowflake>) {
    for thread in threads {
        out.push(thread.comment.author_id);
        collect_author_ids(&thread.replies, out);
    }
}
