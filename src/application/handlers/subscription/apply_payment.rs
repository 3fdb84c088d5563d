//! ApplyPaymentHandler - Command handler for recording a payment.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, Money, SubscriptionId};
use crate::domain::subscription::{
    PaymentApplied, PaymentRecord, PaymentRequest, Subscription, SubscriptionError,
};
use crate::ports::{Clock, EventPublisher, PaymentLedger, SubscriptionRepository};

use super::support;

/// Command to apply a payment to a subscription.
#[derive(Debug, Clone)]
pub struct ApplyPaymentCommand {
    pub subscription_id: SubscriptionId,
    pub payment: PaymentRequest,
}

/// Result of a successful payment.
#[derive(Debug, Clone)]
pub struct ApplyPaymentResult {
    pub subscription: Subscription,
    pub payment: PaymentRecord,
    pub remaining_amount: Money,
}

/// Handler for applying payments.
///
/// The aggregate is updated first; the ledger line is written only once the
/// new balance is persisted.
pub struct ApplyPaymentHandler {
    repository: Arc<dyn SubscriptionRepository>,
    ledger: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApplyPaymentHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        ledger: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            ledger,
            clock,
            event_publisher,
        }
    }

    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id, amount = %cmd.payment.amount))]
    pub async fn handle(
        &self,
        cmd: ApplyPaymentCommand,
        metadata: CommandMetadata,
    ) -> Result<ApplyPaymentResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;
        let now = self.clock.now();

        subscription
            .apply_payment(cmd.payment.amount, now)
            .inspect_err(|e| warn!(code = %e.code(), "payment rejected: {}", e))?;

        self.repository.update(&subscription, expected_version).await?;

        let record =
            PaymentRecord::from_request(subscription.id, cmd.payment, self.clock.today(), now);
        self.ledger.record(&record).await?;

        let remaining_amount = subscription.remaining_amount();
        let event = PaymentApplied {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            payment_id: record.id,
            amount: record.amount,
            method: record.method.clone(),
            remaining_amount,
            applied_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(
            payment_id = %record.id,
            method = %record.method,
            remaining = %remaining_amount,
            "payment applied"
        );

        Ok(ApplyPaymentResult {
            subscription,
            payment: record,
            remaining_amount,
        })
    }
}
