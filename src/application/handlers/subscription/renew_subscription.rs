//! RenewSubscriptionHandler - Command handler for starting a new cycle.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SubscriptionId};
use crate::domain::subscription::{
    PaymentRecord, RenewalOutcome, RenewalRequest, Subscription, SubscriptionError,
    SubscriptionRenewed,
};
use crate::ports::{
    Clock, EventPublisher, PaymentLedger, PermissionChecker, SubscriptionRepository,
    SubscriptionTypeCatalog,
};

use super::support;

/// Command to renew a subscription.
#[derive(Debug, Clone)]
pub struct RenewSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub renewal: RenewalRequest,
}

/// Result of a renewal.
#[derive(Debug, Clone)]
pub struct RenewSubscriptionResult {
    pub subscription: Subscription,
    pub previous: RenewalOutcome,
    /// Ledger line for the renewal payment, if anything was paid.
    pub payment: Option<PaymentRecord>,
}

/// Handler for renewals.
///
/// The renewed cycle is persisted first; the payment goes to the ledger
/// only once that write has succeeded.
pub struct RenewSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    catalog: Arc<dyn SubscriptionTypeCatalog>,
    ledger: Arc<dyn PaymentLedger>,
    permissions: Arc<dyn PermissionChecker>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RenewSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        catalog: Arc<dyn SubscriptionTypeCatalog>,
        ledger: Arc<dyn PaymentLedger>,
        permissions: Arc<dyn PermissionChecker>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            catalog,
            ledger,
            permissions,
            clock,
            event_publisher,
        }
    }

    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id))]
    pub async fn handle(
        &self,
        cmd: RenewSubscriptionCommand,
        metadata: CommandMetadata,
    ) -> Result<RenewSubscriptionResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;

        let decision = self
            .permissions
            .can_manage_subscription(&metadata.user_id, &subscription)
            .await;
        support::require(decision, "renew subscriptions", &metadata)?;

        let today = self.clock.today();
        let now = self.clock.now();
        let target_type_id = cmd.renewal.target_type_id(subscription.type_id);
        let sub_type = self.catalog.find(&target_type_id).await?;

        let previous = subscription
            .renew(&cmd.renewal, sub_type.as_ref(), today, now)
            .inspect_err(|e| warn!(code = %e.code(), "renewal rejected: {}", e))?;

        self.repository.update(&subscription, expected_version).await?;

        let payment = if cmd.renewal.payment.amount.is_positive() {
            let record =
                PaymentRecord::from_request(subscription.id, cmd.renewal.payment, today, now);
            self.ledger.record(&record).await?;
            Some(record)
        } else {
            None
        };

        let event = SubscriptionRenewed {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            previous_type_id: previous.previous_type_id,
            type_id: subscription.type_id,
            previous_end_date: previous.previous_end_date,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            payment: subscription.paid_amount,
            payment_id: payment.as_ref().map(|p| p.id),
            renewed_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(
            type_id = %subscription.type_id,
            start_date = %subscription.start_date,
            end_date = %subscription.end_date,
            payment = %subscription.paid_amount,
            "subscription renewed"
        );

        Ok(RenewSubscriptionResult {
            subscription,
            previous,
            payment,
        })
    }
}
