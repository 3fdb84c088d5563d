//! RequestFreezeHandler - Command handler for pausing a subscription.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CalendarDate, CommandMetadata, EventId, SubscriptionId};
use crate::domain::subscription::{
    FreezeRequest, FreezeRequestInput, FreezeRequested, Subscription, SubscriptionError,
};
use crate::ports::{Clock, EventPublisher, SubscriptionRepository, SubscriptionTypeCatalog};

use super::support;

/// Command to freeze a subscription.
#[derive(Debug, Clone)]
pub struct RequestFreezeCommand {
    pub subscription_id: SubscriptionId,
    /// Signed so that zero and negative input is rejected as `InvalidDays`.
    pub requested_days: i64,
    pub start_date: Option<CalendarDate>,
}

/// Result of an accepted freeze.
#[derive(Debug, Clone)]
pub struct RequestFreezeResult {
    pub subscription: Subscription,
    pub freeze: FreezeRequest,
}

/// Handler for freeze requests.
///
/// The freeze cap comes from the subscription's type. If the type has gone
/// missing from the catalogue the configured default cap applies.
pub struct RequestFreezeHandler {
    repository: Arc<dyn SubscriptionRepository>,
    catalog: Arc<dyn SubscriptionTypeCatalog>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
    default_max_freeze_days: u32,
}

impl RequestFreezeHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        catalog: Arc<dyn SubscriptionTypeCatalog>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
        default_max_freeze_days: u32,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
            event_publisher,
            default_max_freeze_days,
        }
    }

    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id, days = cmd.requested_days))]
    pub async fn handle(
        &self,
        cmd: RequestFreezeCommand,
        metadata: CommandMetadata,
    ) -> Result<RequestFreezeResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;
        let today = self.clock.today();
        let now = self.clock.now();

        let max_freeze_days = match self.catalog.find(&subscription.type_id).await? {
            Some(sub_type) => sub_type.max_freeze_days,
            None => {
                warn!(
                    type_id = %subscription.type_id,
                    default = self.default_max_freeze_days,
                    "subscription type missing, using default freeze cap"
                );
                self.default_max_freeze_days
            }
        };

        let input = FreezeRequestInput::new(cmd.requested_days, cmd.start_date);
        let freeze = subscription
            .request_freeze(input, today, max_freeze_days, now)
            .inspect_err(|e| warn!(code = %e.code(), "freeze rejected: {}", e))?;

        self.repository.update(&subscription, expected_version).await?;

        let event = FreezeRequested {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            freeze_request_id: freeze.id,
            requested_days: freeze.requested_days,
            start_date: freeze.start_date,
            requested_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(
            freeze_request_id = %freeze.id,
            start_date = %freeze.start_date,
            requested_days = freeze.requested_days,
            "freeze requested"
        );

        Ok(RequestFreezeResult {
            subscription,
            freeze,
        })
    }
}
