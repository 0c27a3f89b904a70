//! # clip-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export the service layer surface for handler crates
pub use dto::{
    ApiResponse, AuthResponse, ChangePasswordRequest, ChannelResponse, CommentLikeResponse,
    CommentPinResponse, CommentResponse, CreateCommentRequest, CreateReportRequest,
    CreatorStatsResponse, CurrentUserResponse, FilePayload, HealthChecks, HealthResponse,
    LoginRequest, NotificationResponse, ReactionStateResponse, ReadinessResponse, RegisterRequest,
    SetReactionRequest, ShareCountResponse, SubscriptionResponse, UnreadCountResponse,
    UpdateProfileRequest, UploadVideoRequest, UserResponse, VideoDetailResponse, VideoResponse,
    ViewCountResponse, WatchLaterResponse,
};
pub use services::{
    AuthService, CommentService, NotificationService, ReactionService, ReportService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SubscriptionService,
    UserService, VideoService,
};
