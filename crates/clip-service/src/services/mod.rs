//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod notification;
pub mod reaction;
pub mod report;
pub mod subscription;
pub mod user;
pub mod video;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use reaction::ReactionService;
pub use report::ReportService;
pub use subscription::SubscriptionService;
pub use user::UserService;
pub use video::VideoService;
