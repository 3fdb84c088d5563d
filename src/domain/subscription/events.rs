//! Subscription domain events.
//!
//! Events published after a lifecycle change has been persisted:
//! - `SubscriptionCreated` - New subscription sold
//! - `PaymentApplied` - Payment recorded against the balance
//! - `FreezeRequested` - Freeze request added
//! - `FreezeCancelled` - Freeze request withdrawn
//! - `SubscriptionRenewed` - New cycle started
//! - `SubscriptionCancelled` - Subscription cancelled with refund
//! - `SubscriptionUpdated` - Dates, coach or price edited
//! - `EntryAdmitted` - Visit recorded at the door

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, CalendarDate, ClubId, EventId, FreezeRequestId, MemberId, Money, PaymentId,
    SubscriptionId, SubscriptionTypeId, Timestamp, UserId,
};

use super::{EntryAllowance, PaymentMethod, SubscriptionUpdate};

// ════════════════════════════════════════════════════════════════════════════
// SubscriptionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a subscription is sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCreated {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub type_id: SubscriptionTypeId,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub price: Money,
    pub initial_payment: Money,
    pub created_at: Timestamp,
}

domain_event!(
    SubscriptionCreated,
    event_type = "subscription.created.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PaymentApplied
// ════════════════════════════════════════════════════════════════════════════

/// Published when a payment reduces the outstanding balance.
///
/// Carries the balance after the payment so billing views need no reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentApplied {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub payment_id: PaymentId,
    pub amount: Money,
    pub method: PaymentMethod,
    /// Balance left after this payment.
    pub remaining_amount: Money,
    pub applied_at: Timestamp,
}

domain_event!(
    PaymentApplied,
    event_type = "subscription.payment_applied.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = applied_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// FreezeRequested
// ════════════════════════════════════════════════════════════════════════════

/// Published when a freeze request is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRequested {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub freeze_request_id: FreezeRequestId,
    pub requested_days: u32,
    pub start_date: CalendarDate,
    pub requested_at: Timestamp,
}

domain_event!(
    FreezeRequested,
    event_type = "subscription.freeze_requested.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = requested_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// FreezeCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when staff withdraw a freeze request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeCancelled {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub freeze_request_id: FreezeRequestId,
    /// Staff user who cancelled it.
    pub cancelled_by: UserId,
    pub cancelled_at: Timestamp,
}

domain_event!(
    FreezeCancelled,
    event_type = "subscription.freeze_cancelled.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SubscriptionRenewed
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new cycle starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRenewed {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub previous_type_id: SubscriptionTypeId,
    pub type_id: SubscriptionTypeId,
    pub previous_end_date: CalendarDate,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub payment: Money,
    /// Ledger line for `payment`; None when nothing was paid.
    pub payment_id: Option<PaymentId>,
    pub renewed_at: Timestamp,
}

domain_event!(
    SubscriptionRenewed,
    event_type = "subscription.renewed.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = renewed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SubscriptionCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a subscription is cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCancelled {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub refund_amount: Money,
    /// Name of the refund policy that produced `refund_amount`.
    pub refund_policy: String,
    pub cancelled_on: CalendarDate,
    pub cancelled_at: Timestamp,
}

domain_event!(
    SubscriptionCancelled,
    event_type = "subscription.cancelled.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SubscriptionUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when dates, coach or price are edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdated {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub changes: SubscriptionUpdate,
    pub updated_at: Timestamp,
}

domain_event!(
    SubscriptionUpdated,
    event_type = "subscription.updated.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// EntryAdmitted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a visit is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAdmitted {
    pub event_id: EventId,
    pub subscription_id: SubscriptionId,
    pub member_id: MemberId,
    /// Visit count after this entry.
    pub entry_count: u32,
    pub remaining: EntryAllowance,
    pub admitted_at: Timestamp,
}

domain_event!(
    EntryAdmitted,
    event_type = "subscription.entry_admitted.v1",
    aggregate_id = subscription_id,
    aggregate_type = "Subscription",
    occurred_at = admitted_at,
    event_id = event_id
);
