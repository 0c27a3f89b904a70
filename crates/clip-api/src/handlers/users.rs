//! User and channel handlers
//!
//! Current-user profile management, channel pages, subscriptions, watch
//! history, watch-later, the personalized feed, and the creator dashboard.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use clip_core::traits::{VideoQuery, VideoSort};
use clip_service::{
    ChannelResponse, CreatorStatsResponse, CurrentUserResponse, FilePayload, SubscriptionResponse,
    UpdateProfileRequest, UserResponse, UserService, VideoResponse, VideoService,
    SubscriptionService,
};
use serde::Deserialize;

use crate::extractors::{parse_id, AuthUser, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Get the current user's profile
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.current_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the current user's profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Upload a new avatar for the current user
///
/// PUT /users/@me/avatar (multipart, field "avatar")
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<CurrentUserResponse>> {
    let mut avatar = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() == Some("avatar") {
            let filename = field.file_name().unwrap_or("avatar.png").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?
                .to_vec();
            avatar = Some(FilePayload { data, filename });
        }
    }

    let file = avatar.ok_or_else(|| ApiError::bad_request("Missing 'avatar' file field"))?;

    let service = UserService::new(state.service_context());
    let response = service.update_avatar(auth.user_id, file).await?;
    Ok(Json(response))
}

/// Creator dashboard aggregates for the current user
///
/// GET /users/@me/stats
pub async fn get_creator_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CreatorStatsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.creator_stats(auth.user_id).await?;
    Ok(Json(response))
}

/// Channels the current user subscribes to
///
/// GET /users/@me/subscriptions
pub async fn get_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.subscriptions(auth.user_id).await?;
    Ok(Json(response))
}

/// Watch history, most recently watched first
///
/// GET /users/@me/history
pub async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let response = service.history(auth.user_id, pagination.limit).await?;
    Ok(Json(response))
}

/// Watch-later list, most recently saved first
///
/// GET /users/@me/watch-later
pub async fn get_watch_later(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let response = service.watch_later(auth.user_id, pagination.limit).await?;
    Ok(Json(response))
}

/// Personalized feed: subscribed channels plus popular uploads
///
/// GET /users/@me/feed
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let response = service.feed(auth.user_id, pagination.limit).await?;
    Ok(Json(response))
}

/// Public channel page for a user
///
/// GET /users/:user_id
pub async fn get_channel(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_id(&user_id, "user_id")?;
    let service = UserService::new(state.service_context());
    let response = service.channel(channel_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Query parameters for a channel's video list
#[derive(Debug, Deserialize)]
pub struct ChannelVideosParams {
    #[serde(default)]
    pub shorts: Option<bool>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Videos uploaded by a channel, newest first
///
/// GET /users/:user_id/videos
pub async fn get_channel_videos(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(user_id): Path<String>,
    Query(params): Query<ChannelVideosParams>,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let channel_id = parse_id(&user_id, "user_id")?;
    let service = VideoService::new(state.service_context());
    let response = service
        .list(
            VideoQuery {
                sort: VideoSort::Latest,
                shorts: params.shorts,
                search: None,
                channel_id: Some(channel_id),
                limit: params.limit.unwrap_or(20),
            },
            viewer.user_id(),
        )
        .await?;
    Ok(Json(response))
}

/// Toggle the caller's subscription to a channel
///
/// PUT /users/:user_id/subscription
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let channel_id = parse_id(&user_id, "user_id")?;
    let service = SubscriptionService::new(state.service_context());
    let response = service.toggle(auth.user_id, channel_id).await?;
    Ok(Json(response))
}
