//! Subscription service

use clip_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::SubscriptionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's subscription to a channel.
    ///
    /// Subscribing notifies the channel owner; unsubscribing is silent.
    /// Subscribing to your own channel is rejected.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<SubscriptionResponse> {
        let subscribed = self
            .ctx
            .subscription_repo()
            .toggle(subscriber_id, channel_id)
            .await?;

        let subscribers = self
            .ctx
            .subscription_repo()
            .count_for_channel(channel_id)
            .await?;

        info!(
            subscriber_id = %subscriber_id,
            channel_id = %channel_id,
            subscribed,
            "Subscription toggled"
        );

        Ok(SubscriptionResponse {
            subscribed,
            subscribers,
        })
    }
}
