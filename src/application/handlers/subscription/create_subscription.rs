//! CreateSubscriptionHandler - Command handler for selling a subscription.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{
    CalendarDate, ClubId, CoachId, CommandMetadata, EventId, MemberId, Money, SubscriptionId,
    SubscriptionTypeId,
};
use crate::domain::subscription::{
    NewSubscription, PaymentRecord, PaymentRequest, Subscription, SubscriptionCreated,
    SubscriptionError,
};
use crate::ports::{
    Clock, EventPublisher, PaymentLedger, SubscriptionRepository, SubscriptionTypeCatalog,
};

use super::support;

/// Command to sell a new subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub type_id: SubscriptionTypeId,
    pub coach_id: Option<CoachId>,
    /// Defaults to today.
    pub start_date: Option<CalendarDate>,
    /// Payment taken at the desk, if any.
    pub initial_payment: Option<PaymentRequest>,
}

/// Result of successful subscription creation.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub subscription: Subscription,
    pub payment: Option<PaymentRecord>,
    pub event: SubscriptionCreated,
}

/// Handler for selling subscriptions.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    catalog: Arc<dyn SubscriptionTypeCatalog>,
    ledger: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        catalog: Arc<dyn SubscriptionTypeCatalog>,
        ledger: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            catalog,
            ledger,
            clock,
            event_publisher,
        }
    }

    #[instrument(skip_all, fields(member_id = %cmd.member_id, type_id = %cmd.type_id))]
    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSubscriptionResult, SubscriptionError> {
        let today = self.clock.today();
        let now = self.clock.now();

        // 1. Resolve the type
        let sub_type = self
            .catalog
            .find(&cmd.type_id)
            .await?
            .ok_or(SubscriptionError::UnknownType(cmd.type_id))?;

        // 2. Build the aggregate (all validation happens here)
        let initial_amount = cmd
            .initial_payment
            .as_ref()
            .map(|p| p.amount)
            .unwrap_or(Money::ZERO);
        let new = NewSubscription {
            member_id: cmd.member_id,
            club_id: cmd.club_id,
            type_id: cmd.type_id,
            coach_id: cmd.coach_id,
            start_date: cmd.start_date.unwrap_or(today),
            initial_payment: initial_amount,
        };
        let subscription = Subscription::create(SubscriptionId::new(), new, &sub_type, now)
            .inspect_err(|e| warn!(code = %e.code(), "subscription rejected: {}", e))?;

        // 3. Persist, then hand any payment to the ledger
        self.repository.save(&subscription).await?;

        let payment = match cmd.initial_payment {
            Some(request) if request.amount.is_positive() => {
                let record = PaymentRecord::from_request(subscription.id, request, today, now);
                self.ledger.record(&record).await?;
                Some(record)
            }
            _ => None,
        };

        // 4. Publish
        let event = SubscriptionCreated {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            member_id: subscription.member_id,
            club_id: subscription.club_id,
            type_id: subscription.type_id,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            price: subscription.price,
            initial_payment: subscription.paid_amount,
            created_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(
            subscription_id = %subscription.id,
            start_date = %subscription.start_date,
            end_date = %subscription.end_date,
            paid = %subscription.paid_amount,
            "subscription created"
        );

        Ok(CreateSubscriptionResult {
            subscription,
            payment,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::test_support::{date, money, Harness};
    use crate::domain::subscription::{PaymentMethod, SubscriptionStatus};
    use crate::ports::PaymentLedger;

    fn handler(h: &Harness) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(
            h.repository.clone(),
            h.catalog.clone(),
            h.ledger.clone(),
            h.clock.clone(),
            h.bus.clone(),
        )
    }

    fn command(h: &Harness, payment: Option<PaymentRequest>) -> CreateSubscriptionCommand {
        CreateSubscriptionCommand {
            member_id: MemberId::new(),
            club_id: ClubId::new(),
            type_id: h.monthly.id,
            coach_id: None,
            start_date: None,
            initial_payment: payment,
        }
    }

    #[tokio::test]
    async fn creates_from_type_starting_today() {
        let h = Harness::new("2024-01-01");
        let result = handler(&h)
            .handle(command(&h, None), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let sub = &result.subscription;
        assert_eq!(sub.start_date, date("2024-01-01"));
        assert_eq!(sub.end_date, date("2024-01-31"));
        assert_eq!(sub.remaining_amount(), money("500.00"));
        assert_eq!(sub.status(date("2024-01-01")), SubscriptionStatus::Active);
        assert!(result.payment.is_none());
        assert_eq!(h.reload(sub.id).await, *sub);
    }

    #[tokio::test]
    async fn initial_payment_goes_to_ledger() {
        let h = Harness::new("2024-01-01");
        let payment = PaymentRequest::new(money("200.00"), PaymentMethod::Card);
        let result = handler(&h)
            .handle(command(&h, Some(payment)), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.subscription.remaining_amount(), money("300.00"));
        let ledger = h.ledger.payments_for(&result.subscription.id).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].amount, money("200.00"));
    }

    #[tokio::test]
    async fn publishes_created_event_with_metadata() {
        let h = Harness::new("2024-01-01");
        let result = handler(&h)
            .handle(command(&h, None), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let events = h.bus.events_of_type("subscription.created.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, result.subscription.id.to_string());
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("desk-1"));
    }

    #[tokio::test]
    async fn unknown_type_is_rejected() {
        let h = Harness::new("2024-01-01");
        let mut cmd = command(&h, None);
        cmd.type_id = SubscriptionTypeId::new();

        let err = handler(&h)
            .handle(cmd.clone(), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, SubscriptionError::UnknownType(cmd.type_id));
        assert!(h.repository.is_empty());
        assert_eq!(h.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn overpayment_at_sale_is_rejected() {
        let h = Harness::new("2024-01-01");
        let payment = PaymentRequest::new(money("600.00"), PaymentMethod::Cash);
        let err = handler(&h)
            .handle(command(&h, Some(payment)), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::ExceedsRemaining { .. }));
        assert!(h.ledger.all().is_empty());
    }
}
