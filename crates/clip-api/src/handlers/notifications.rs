//! Notification handlers
//!
//! Listing the inbox marks every unread notification read.

use axum::{extract::State, Json};
use clip_service::{NotificationResponse, NotificationService, UnreadCountResponse};

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Newest notifications for the current user; reading empties the unread
/// badge
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.list(auth.user_id, pagination.limit).await?;
    Ok(Json(response))
}

/// Unread badge count
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.unread_count(auth.user_id).await?;
    Ok(Json(response))
}
