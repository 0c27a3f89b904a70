//! Authentication service
//!
//! Handles user registration, login, and password changes.

use clip_common::auth::{hash_password, validate_password_strength, verify_password};
use clip_common::AppError;
use clip_core::{DomainError, Snowflake, User};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_username(&request.username)?;
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Usernames are unique case-insensitively
        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameTaken.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, request.username, request.display_name);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        let token = self
            .ctx
            .jwt_service()
            .issue_token(user_id)
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!(username = %request.username, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token = self
            .ctx
            .jwt_service()
            .issue_token(user.id)
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Change the current user's password
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::App(AppError::InvalidCredentials))?;

        let is_valid = verify_password(&request.current_password, &current_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user_id, "Password change failed: wrong current password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .user_repo()
            .update_password(user_id, &new_hash)
            .await?;

        info!(user_id = %user_id, "Password changed");

        Ok(())
    }
}

/// Usernames are 3-32 characters, letters, digits, and underscores only
fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.len() < User::MIN_USERNAME_LEN || username.len() > 32 {
        return Err(DomainError::InvalidUsername(
            "Username must be 3-32 characters".to_string(),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DomainError::InvalidUsername(
            "Username may only contain letters, digits, and underscores".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice_99").is_ok());

        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("alice!").is_err());
        assert!(validate_username("al ice").is_err());
    }
}
