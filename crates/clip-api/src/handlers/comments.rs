//! Comment handlers
//!
//! Posting, threaded listing, likes, pinning, and deletion.

use axum::{
    extract::{Path, State},
    Json,
};
use clip_service::{
    CommentLikeResponse, CommentPinResponse, CommentResponse, CommentService,
    CreateCommentRequest,
};

use crate::extractors::{parse_id, AuthUser, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Threaded comments for a video, pinned first, then newest first
///
/// GET /videos/:video_id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(video_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = CommentService::new(state.service_context());
    let response = service
        .list(video_id, viewer.user_id(), pagination.limit)
        .await?;
    Ok(Json(response))
}

/// Post a comment or a reply
///
/// POST /videos/:video_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = CommentService::new(state.service_context());
    let response = service.post(auth.user_id, video_id, request).await?;
    Ok(Created(Json(response)))
}

/// Toggle the caller's like on a comment
///
/// PUT /comments/:comment_id/like
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<CommentLikeResponse>> {
    let comment_id = parse_id(&comment_id, "comment_id")?;
    let service = CommentService::new(state.service_context());
    let response = service.toggle_like(auth.user_id, comment_id).await?;
    Ok(Json(response))
}

/// Toggle the pinned flag (video owner only)
///
/// PUT /comments/:comment_id/pin
pub async fn toggle_comment_pin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<CommentPinResponse>> {
    let comment_id = parse_id(&comment_id, "comment_id")?;
    let service = CommentService::new(state.service_context());
    let response = service.toggle_pin(auth.user_id, comment_id).await?;
    Ok(Json(response))
}

/// Delete a comment (author or video owner)
///
/// DELETE /comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<NoContent> {
    let comment_id = parse_id(&comment_id, "comment_id")?;
    let service = CommentService::new(state.service_context());
    service.delete(auth.user_id, comment_id).await?;
    Ok(NoContent)
}
