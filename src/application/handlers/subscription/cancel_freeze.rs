//! CancelFreezeHandler - Command handler for withdrawing a freeze request.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, FreezeRequestId, SubscriptionId};
use crate::domain::subscription::{FreezeCancelled, FreezeRequest, Subscription, SubscriptionError};
use crate::ports::{Clock, EventPublisher, PermissionChecker, SubscriptionRepository};

use super::support;

/// Command to cancel a freeze request.
#[derive(Debug, Clone)]
pub struct CancelFreezeCommand {
    pub subscription_id: SubscriptionId,
    pub freeze_request_id: FreezeRequestId,
}

/// Result of a cancelled freeze.
#[derive(Debug, Clone)]
pub struct CancelFreezeResult {
    pub subscription: Subscription,
    pub freeze: FreezeRequest,
}

/// Handler for withdrawing freezes.
///
/// Checks run in this order: freeze exists, freeze is active, caller may
/// cancel it.
pub struct CancelFreezeHandler {
    repository: Arc<dyn SubscriptionRepository>,
    permissions: Arc<dyn PermissionChecker>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelFreezeHandler {
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

    #[instrument(skip_all, fields(
        subscription_id = %cmd.subscription_id,
        freeze_request_id = %cmd.freeze_request_id,
    ))]
    pub async fn handle(
        &self,
        cmd: CancelFreezeCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelFreezeResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;
        let today = self.clock.today();
        let now = self.clock.now();

        let freeze = subscription
            .freeze_request(cmd.freeze_request_id)
            .ok_or(SubscriptionError::FreezeNotFound(cmd.freeze_request_id))?;
        if !freeze.is_active() || freeze.has_elapsed(today) {
            warn!("freeze is not active");
            return Err(SubscriptionError::FreezeNotActive(freeze.id));
        }

        let decision = self
            .permissions
            .can_cancel_freeze(&metadata.user_id, &subscription)
            .await;
        support::require(decision, "cancel freeze requests", &metadata)?;

        let freeze = subscription.cancel_freeze(cmd.freeze_request_id, today, now)?;
        self.repository.update(&subscription, expected_version).await?;

        let event = FreezeCancelled {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            freeze_request_id: freeze.id,
            cancelled_by: metadata.user_id.clone(),
            cancelled_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(cancelled_by = %metadata.user_id, "freeze cancelled");

        Ok(CancelFreezeResult {
            subscription,
            freeze,
        })
    }
}
