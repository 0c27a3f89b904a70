//! Video handlers
//!
//! Upload, browse, views, reactions, shares, watch-later, reports, and
//! deletion.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use clip_core::traits::{VideoQuery, VideoSort};
use clip_service::{
    CreateReportRequest, FilePayload, ReactionService, ReactionStateResponse, ReportService,
    SetReactionRequest, ShareCountResponse, UploadVideoRequest, VideoDetailResponse, VideoResponse,
    VideoService, ViewCountResponse, WatchLaterResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::extractors::{parse_id, AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Query parameters for browsing videos
#[derive(Debug, Deserialize)]
pub struct ListVideosParams {
    /// "latest" (default), "popular", or "trending"
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub shorts: Option<bool>,
    /// Case-insensitive substring match over title, description, and tags
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListVideosParams {
    fn into_query(self) -> Result<VideoQuery, ApiError> {
        let sort = match self.sort.as_deref() {
            None | Some("latest") => VideoSort::Latest,
            Some("popular") => VideoSort::Popular,
            Some("trending") => VideoSort::Trending,
            Some(other) => {
                return Err(ApiError::bad_request(format!("Unknown sort: {other}")));
            }
        };

        Ok(VideoQuery {
            sort,
            shorts: self.shorts,
            search: self.search.filter(|s| !s.trim().is_empty()),
            channel_id: None,
            limit: self.limit.unwrap_or(20),
        })
    }
}

/// Browse videos
///
/// GET /videos?sort=&shorts=&search=&limit=
pub async fn list_videos(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<ListVideosParams>,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let response = service.list(params.into_query()?, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Upload a video
///
/// POST /videos (multipart: "video" file, optional "thumbnail" file, plus
/// metadata fields)
pub async fn upload_video(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<VideoResponse>>> {
    let mut request = UploadVideoRequest::default();
    let mut video_file = None;
    let mut thumbnail = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };

        match name.as_str() {
            "video" => {
                let filename = field.file_name().unwrap_or("video.mp4").to_string();
                let data = read_file_field(field).await?;
                video_file = Some(FilePayload { data, filename });
            }
            "thumbnail" => {
                let filename = field.file_name().unwrap_or("thumbnail.jpg").to_string();
                let data = read_file_field(field).await?;
                thumbnail = Some(FilePayload { data, filename });
            }
            "title" => request.title = read_text_field(field).await?,
            "description" => request.description = read_text_field(field).await?,
            "tags" => request.tags = read_text_field(field).await?,
            "duration" => {
                request.duration = read_text_field(field).await?.parse().unwrap_or(0.0);
            }
            "quality" => request.quality = Some(read_text_field(field).await?),
            "is_short" => {
                let raw = read_text_field(field).await?;
                request.is_short = matches!(raw.as_str(), "true" | "1");
            }
            _ => {}
        }
    }

    request.validate()?;
    let video_file =
        video_file.ok_or_else(|| ApiError::bad_request("Missing 'video' file field"))?;

    let service = VideoService::new(state.service_context());
    let response = service
        .upload(auth.user_id, request, video_file, thumbnail)
        .await?;
    Ok(Created(Json(response)))
}

async fn read_file_field(field: axum::extract::multipart::Field<'_>) -> Result<Vec<u8>, ApiError> {
    Ok(field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
        .to_vec())
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Get a single video with channel and viewer context
///
/// GET /videos/:video_id
pub async fn get_video(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoDetailResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = VideoService::new(state.service_context());
    let response = service.get(video_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Delete a video owned by the caller
///
/// DELETE /videos/:video_id
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<NoContent> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = VideoService::new(state.service_context());
    service.delete(video_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Record a view. Anonymous views count too; authenticated viewers also get
/// a watch history entry.
///
/// POST /videos/:video_id/views
pub async fn record_view(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Json<ViewCountResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = VideoService::new(state.service_context());
    let response = service.record_view(video_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Record a share
///
/// POST /videos/:video_id/shares
pub async fn record_share(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<ShareCountResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = VideoService::new(state.service_context());
    let response = service.share(video_id).await?;
    Ok(Json(response))
}

/// Set the caller's reaction (1 like, -1 dislike, 0 clear)
///
/// PUT /videos/:video_id/reaction
pub async fn set_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    Json(request): Json<SetReactionRequest>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = ReactionService::new(state.service_context());
    let response = service.set(auth.user_id, video_id, request.value).await?;
    Ok(Json(response))
}

/// Toggle the video on the caller's watch-later list
///
/// PUT /videos/:video_id/watch-later
pub async fn toggle_watch_later(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Json<WatchLaterResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = VideoService::new(state.service_context());
    let response = service.toggle_watch_later(auth.user_id, video_id).await?;
    Ok(Json(response))
}

/// File a report against a video
///
/// POST /videos/:video_id/reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateReportRequest>,
) -> ApiResult<Created<NoContent>> {
    let video_id = parse_id(&video_id, "video_id")?;
    let service = ReportService::new(state.service_context());
    service.create(auth.user_id, video_id, request).await?;
    Ok(Created(NoContent))
}
