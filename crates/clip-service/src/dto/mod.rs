//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ChangePasswordRequest, CreateCommentRequest, CreateReportRequest, FilePayload, LoginRequest,
    RegisterRequest, SetReactionRequest, UpdateProfileRequest, UploadVideoRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, AuthResponse, ChannelResponse, CommentLikeResponse, CommentPinResponse,
    CommentResponse, CreatorStatsResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    NotificationResponse, ReactionStateResponse, ReadinessResponse, ShareCountResponse,
    SubscriptionResponse, UnreadCountResponse, UserResponse, VideoDetailResponse, VideoResponse,
    ViewCountResponse, WatchLaterResponse,
};

// Re-export mappers and helper structs
pub use mappers::{comment_thread_response, ChannelProfile};
