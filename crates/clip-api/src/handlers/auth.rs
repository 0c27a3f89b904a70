//! Authentication handlers
//!
//! Endpoints for user registration, login, and password changes.

use axum::{extract::State, Json};
use clip_service::{
    AuthResponse, AuthService, ChangePasswordRequest, LoginRequest, RegisterRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with username and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Log out the current user.
///
/// Access tokens are stateless, so there is nothing to revoke server-side;
/// the endpoint validates the token and the client discards its copy.
///
/// POST /auth/logout
pub async fn logout(auth: AuthUser) -> ApiResult<NoContent> {
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok(NoContent)
}

/// Change the current user's password
///
/// PUT /users/@me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}
