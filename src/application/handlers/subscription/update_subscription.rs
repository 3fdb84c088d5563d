//! UpdateSubscriptionHandler - Command handler for editing a subscription.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SubscriptionId};
use crate::domain::subscription::{
    Subscription, SubscriptionError, SubscriptionUpdate, SubscriptionUpdated,
};
use crate::ports::{Clock, EventPublisher, PermissionChecker, SubscriptionRepository};

use super::support;

/// Command to edit dates, coach or price.
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub changes: SubscriptionUpdate,
}

pub struct UpdateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    permissions: Arc<dyn PermissionChecker>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        permissions: Arc<dyn PermissionChecker>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            permissions,
            clock,
            event_publisher,
        }
    }

    /// Applies the changes. An empty change set is a no-op and publishes nothing.
    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id))]
    pub async fn handle(
        &self,
        cmd: UpdateSubscriptionCommand,
        metadata: CommandMetadata,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        if cmd.changes.is_empty() {
            return Ok(subscription);
        }
        let expected_version = subscription.version;

        let decision = self
            .permissions
            .can_manage_subscription(&metadata.user_id, &subscription)
            .await;
        support::require(decision, "edit subscriptions", &metadata)?;

        let now = self.clock.now();
        subscription
            .update(&cmd.changes, now)
            .inspect_err(|e| warn!(code = %e.code(), "update rejected: {}", e))?;

        self.repository.update(&subscription, expected_version).await?;

        let event = SubscriptionUpdated {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            changes: cmd.changes,
            updated_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(version = subscription.version, "subscription updated");
        Ok(subscription)
    }
}
