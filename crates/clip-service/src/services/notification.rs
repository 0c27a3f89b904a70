//! Notification service
//!
//! The inbox read model. Listing the inbox marks everything read, so the
//! unread badge drains on open.

use clip_core::Snowflake;
use tracing::instrument;

use crate::dto::{NotificationResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Largest notification page size
const MAX_NOTIFICATION_LIMIT: i64 = 50;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest notifications for the user; every unread notification is
    /// marked read in the same transaction
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let views = self
            .ctx
            .notification_repo()
            .list_and_mark_read(user_id, limit.clamp(1, MAX_NOTIFICATION_LIMIT))
            .await?;

        Ok(views.iter().map(NotificationResponse::from).collect())
    }

    /// Unread badge count
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let unread = self.ctx.notification_repo().unread_count(user_id).await?;
        Ok(UnreadCountResponse { unread })
    }
}
