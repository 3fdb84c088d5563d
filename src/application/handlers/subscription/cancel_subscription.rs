//! CancelSubscriptionHandler - Command handler for cancelling a subscription.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SubscriptionId};
use crate::domain::subscription::{
    Cancellation, RefundPolicy, Subscription, SubscriptionCancelled, SubscriptionError,
};
use crate::ports::{Clock, EventPublisher, PermissionChecker, SubscriptionRepository};

use super::support;

/// Command to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub subscription_id: SubscriptionId,
}

/// Result of a cancellation.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionResult {
    pub subscription: Subscription,
    pub cancellation: Cancellation,
}

/// Handler for cancellations.
///
/// The refund is computed by the injected policy; paying it out is up to
/// whoever consumes `subscription.cancelled.v1`.
pub struct CancelSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    permissions: Arc<dyn PermissionChecker>,
    refund_policy: Arc<dyn RefundPolicy>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        permissions: Arc<dyn PermissionChecker>,
        refund_policy: Arc<dyn RefundPolicy>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            permissions,
            refund_policy,
            clock,
            event_publisher,
        }
    }

    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id, policy = self.refund_policy.name()))]
    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelSubscriptionResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;

        let decision = self
            .permissions
            .can_manage_subscription(&metadata.user_id, &subscription)
            .await;
        support::require(decision, "cancel subscriptions", &metadata)?;

        let today = self.clock.today();
        let now = self.clock.now();
        let cancellation = subscription
            .cancel(today, self.refund_policy.as_ref(), now)
            .inspect_err(|e| warn!(code = %e.code(), "cancellation rejected: {}", e))?;

        self.repository.update(&subscription, expected_version).await?;

        let event = SubscriptionCancelled {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            refund_amount: cancellation.refund_amount,
            refund_policy: cancellation.refund_policy.clone(),
            cancelled_on: cancellation.cancelled_on,
            cancelled_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(
            refund = %cancellation.refund_amount,
            cancelled_on = %cancellation.cancelled_on,
            "subscription cancelled"
        );

        Ok(CancelSubscriptionResult {
            subscription,
            cancellation,
        })
    }
}
