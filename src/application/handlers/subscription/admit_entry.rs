//! AdmitEntryHandler - Command handler for letting a member in.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::foundation::{CommandMetadata, EventId, SubscriptionId};
use crate::domain::subscription::{EntryAdmitted, EntryAllowance, SubscriptionError};
use crate::ports::{AttendanceRecorder, Clock, EventPublisher, SubscriptionRepository};

use super::support;

/// Command to admit one entry.
#[derive(Debug, Clone)]
pub struct AdmitEntryCommand {
    pub subscription_id: SubscriptionId,
}

/// Result of an admitted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmitEntryResult {
    pub entry_count: u32,
    /// Entries left after this one.
    pub remaining: EntryAllowance,
}

/// Handler for entry admission.
///
/// The slot is taken on the aggregate and persisted under the version check
/// before the attendance recorder stores the visit. If the recorder then
/// fails, the error is returned and the slot stays taken.
pub struct AdmitEntryHandler {
    repository: Arc<dyn SubscriptionRepository>,
    attendance: Arc<dyn AttendanceRecorder>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AdmitEntryHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        attendance: Arc<dyn AttendanceRecorder>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            attendance,
            clock,
            event_publisher,
        }
    }

    #[instrument(skip_all, fields(subscription_id = %cmd.subscription_id))]
    pub async fn handle(
        &self,
        cmd: AdmitEntryCommand,
        metadata: CommandMetadata,
    ) -> Result<AdmitEntryResult, SubscriptionError> {
        let mut subscription = support::load(self.repository.as_ref(), cmd.subscription_id).await?;
        let expected_version = subscription.version;
        let today = self.clock.today();
        let now = self.clock.now();

        let remaining = subscription
            .admit_entry(today, now)
            .inspect_err(|e| warn!(code = %e.code(), "entry refused: {}", e))?;

        // Persist the slot first; a concurrent admission on the same version
        // fails here with Conflict before any visit is written.
        self.repository.update(&subscription, expected_version).await?;

        self.attendance
            .record_entry(&subscription.id, &subscription.member_id, today)
            .await
            .inspect_err(|e| warn!(error = %e, "entry slot taken but visit not recorded"))?;

        let event = EntryAdmitted {
            event_id: EventId::new(),
            subscription_id: subscription.id,
            member_id: subscription.member_id,
            entry_count: subscription.entry_count,
            remaining,
            admitted_at: now,
        };
        support::publish(self.event_publisher.as_ref(), &metadata, &event).await?;

        info!(entry_count = subscription.entry_count, remaining = %remaining, "entry admitted");

        Ok(AdmitEntryResult {
            entry_count: subscription.entry_count,
            remaining,
        })
    }
}
