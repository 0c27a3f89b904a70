//! User service
//!
//! Profile management, channel pages, subscriptions list, and the creator
//! dashboard.

use chrono::Utc;
use clip_core::traits::Bucket;
use clip_core::{DomainError, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    ChannelProfile, ChannelResponse, CreatorStatsResponse, CurrentUserResponse, FilePayload,
    UpdateProfileRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's full profile, including the unread badge
    #[instrument(skip(self))]
    pub async fn current_profile(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.require_user(user_id).await?;
        self.profile_with_badge(&user).await
    }

    /// Update profile fields of the current user
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.require_user(user_id).await?;

        if let Some(display_name) = request.display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        user.updated_at = Utc::now();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        self.profile_with_badge(&user).await
    }

    /// Upload a new avatar image and set it on the profile
    #[instrument(skip(self, file), fields(filename = %file.filename))]
    pub async fn update_avatar(
        &self,
        user_id: Snowflake,
        file: FilePayload,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.require_user(user_id).await?;

        let avatar_url = self
            .ctx
            .storage()
            .upload(file.data, &file.filename, Bucket::Avatars)
            .await?;

        user.avatar = Some(avatar_url);
        user.updated_at = Utc::now();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Avatar updated");

        self.profile_with_badge(&user).await
    }

    /// Public channel page: profile, stats, and the viewer's subscription state
    #[instrument(skip(self))]
    pub async fn channel(
        &self,
        channel_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ChannelResponse> {
        let user = self.require_user(channel_id).await?;
        let stats = self.ctx.video_repo().channel_stats(channel_id).await?;

        let subscribed = match viewer {
            Some(viewer_id) => {
                self.ctx
                    .subscription_repo()
                    .is_subscribed(viewer_id, channel_id)
                    .await?
            }
            None => false,
        };

        Ok(ChannelResponse::from(ChannelProfile {
            user,
            stats,
            subscribed,
        }))
    }

    /// Aggregates for the creator dashboard
    #[instrument(skip(self))]
    pub async fn creator_stats(&self, user_id: Snowflake) -> ServiceResult<CreatorStatsResponse> {
        let stats = self.ctx.video_repo().creator_stats(user_id).await?;
        Ok(CreatorStatsResponse::from(stats))
    }

    /// Channels the user subscribes to, most recent first
    #[instrument(skip(self))]
    pub async fn subscriptions(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let channels = self
            .ctx
            .subscription_repo()
            .list_channels(user_id)
            .await?;

        Ok(channels.iter().map(UserResponse::from).collect())
    }

    async fn profile_with_badge(&self, user: &User) -> ServiceResult<CurrentUserResponse> {
        let unread = self.ctx.notification_repo().unread_count(user.id).await?;
        Ok(CurrentUserResponse::from(user).with_unread(unread))
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
