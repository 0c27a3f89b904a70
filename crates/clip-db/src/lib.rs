//! # clip-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `clip-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Engagement operations that must keep counters, ledgers, and notification
//! rows consistent run inside a single transaction here; the pure state
//! logic lives in `clip-core`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clip_db::pool::{create_pool, DatabaseConfig};
//! use clip_db::repositories::PgVideoRepository;
//! use clip_core::traits::VideoRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let video_repo = PgVideoRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgNotificationRepository, PgReactionRepository, PgReportRepository,
    PgSubscriptionRepository, PgUserRepository, PgVideoRepository,
};
