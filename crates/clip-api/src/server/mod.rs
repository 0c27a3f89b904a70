//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use clip_common::{AppConfig, AppError, JwtService};
use clip_core::SnowflakeGenerator;
use clip_db::{
    create_pool, PgCommentRepository, PgNotificationRepository, PgReactionRepository,
    PgReportRepository, PgSubscriptionRepository, PgUserRepository, PgVideoRepository,
};
use clip_service::ServiceContextBuilder;
use clip_storage::HttpObjectStorage;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = create_router(config.storage.max_upload_bytes());
    let api = apply_middleware(
        api,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // Health endpoints skip the rate limiter so probes never get throttled
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = clip_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let storage = Arc::new(HttpObjectStorage::new(&config.storage));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let video_repo = Arc::new(PgVideoRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(
        pool.clone(),
        snowflake_generator.clone(),
    ));
    let subscription_repo = Arc::new(PgSubscriptionRepository::new(
        pool.clone(),
        snowflake_generator.clone(),
    ));
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));
    let report_repo = Arc::new(PgReportRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .video_repo(video_repo)
        .reaction_repo(reaction_repo)
        .comment_repo(comment_repo)
        .subscription_repo(subscription_repo)
        .notification_repo(notification_repo)
        .report_repo(report_repo)
        .storage(storage)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
