//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, notifications, users, videos};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate
/// middleware handling)
pub fn create_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes(max_upload_bytes))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes(max_upload_bytes))
        .merge(video_routes(max_upload_bytes))
        .merge(comment_routes())
        .merge(notification_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

/// User and channel routes
fn user_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route(
            "/users/@me/avatar",
            put(users::update_avatar).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/users/@me/password", put(auth::change_password))
        .route("/users/@me/stats", get(users::get_creator_stats))
        .route("/users/@me/subscriptions", get(users::get_subscriptions))
        .route("/users/@me/history", get(users::get_history))
        .route("/users/@me/watch-later", get(users::get_watch_later))
        .route("/users/@me/feed", get(users::get_feed))
        .route("/users/:user_id", get(users::get_channel))
        .route("/users/:user_id/videos", get(users::get_channel_videos))
        .route(
            "/users/:user_id/subscription",
            put(users::toggle_subscription),
        )
}

/// Video routes
fn video_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/videos", get(videos::list_videos))
        .route(
            "/videos",
            post(videos::upload_video).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/videos/:video_id", get(videos::get_video))
        .route("/videos/:video_id", delete(videos::delete_video))
        .route("/videos/:video_id/views", post(videos::record_view))
        .route("/videos/:video_id/shares", post(videos::record_share))
        .route("/videos/:video_id/reaction", put(videos::set_reaction))
        .route(
            "/videos/:video_id/watch-later",
            put(videos::toggle_watch_later),
        )
        .route("/videos/:video_id/reports", post(videos::create_report))
        .route("/videos/:video_id/comments", get(comments::list_comments))
        .route("/videos/:video_id/comments", post(comments::create_comment))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:comment_id/like", put(comments::toggle_comment_like))
        .route("/comments/:comment_id/pin", put(comments::toggle_comment_pin))
        .route("/comments/:comment_id", delete(comments::delete_comment))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
}
