//! Derived subscription status.
//!
//! Status is never stored. It is recomputed from the subscription's dates,
//! its cancel flag and its active freeze every time it is read, so a stale
//! copy can never disagree with the rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::CalendarDate;

use super::{FreezeRequest, Subscription};

/// Where a subscription stands on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Start date is still in the future.
    Upcoming,

    /// Inside the [start, end] window and not paused.
    Active,

    /// End date has passed.
    Expired,

    /// Paused by a freeze whose window covers today.
    Frozen,

    /// Cancelled by staff; overrides every other state.
    Cancelled,
}

impl SubscriptionStatus {
    /// All statuses, in display order.
    pub const ALL: [SubscriptionStatus; 5] = [
        SubscriptionStatus::Upcoming,
        SubscriptionStatus::Active,
        SubscriptionStatus::Frozen,
        SubscriptionStatus::Expired,
        SubscriptionStatus::Cancelled,
    ];

    /// Returns the stable lowercase name used in APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Upcoming => "upcoming",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Frozen => "frozen",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    /// True for the one status that admits entries and accepts freezes.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the status of `sub` on `today`.
///
/// Precedence: Cancelled, then Frozen, then Upcoming/Expired by date,
/// otherwise Active. Both `start_date` and `end_date` count as Active.
pub fn derive_status(sub: &Subscription, today: CalendarDate) -> SubscriptionStatus {
    status_from_parts(
        today,
        sub.start_date,
        sub.end_date,
        sub.is_cancelled,
        sub.active_freeze(),
    )
}

/// The status rule over its raw inputs.
pub fn status_from_parts(
    today: CalendarDate,
    start_date: CalendarDate,
    end_date: CalendarDate,
    is_cancelled: bool,
    active_freeze: Option<&FreezeRequest>,
) -> SubscriptionStatus {
    if is_cancelled {
        return SubscriptionStatus::Cancelled;
    }
    if active_freeze.is_some_and(|freeze| freeze.covers(today)) {
        return SubscriptionStatus::Frozen;
    }
    if today < start_date {
        return SubscriptionStatus::Upcoming;
    }
    if today > end_date {
        return SubscriptionStatus::Expired;
    }
    SubscriptionStatus::Active
}
