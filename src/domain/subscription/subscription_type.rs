//! Subscription type definitions.
//!
//! A type is a catalogue entry ("Monthly unlimited", "10-visit pass") owned
//! outside this crate. The lifecycle engine only reads its duration, price
//! and limits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CalendarDate, Money, SubscriptionTypeId, ValidationError};

/// A sellable subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionType {
    pub id: SubscriptionTypeId,
    pub name: String,
    /// Length of one cycle in days.
    pub duration_days: u32,
    pub price: Money,
    /// Entry allowance per cycle. None = unlimited.
    pub max_entries: Option<u32>,
    /// Longest single freeze allowed.
    pub max_freeze_days: u32,
    /// Retired types stay readable but cannot be sold or renewed into.
    pub is_active: bool,
}

impl SubscriptionType {
    /// Creates an active subscription type.
    ///
    /// # Errors
    ///
    /// Rejects an empty name, a zero duration and a negative price.
    pub fn new(
        id: SubscriptionTypeId,
        name: impl Into<String>,
        duration_days: u32,
        price: Money,
        max_entries: Option<u32>,
        max_freeze_days: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if duration_days == 0 {
            return Err(ValidationError::out_of_range(
                "duration_days",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        if price.is_negative() {
            return Err(ValidationError::invalid_format(
                "price",
                format!("{} is negative", price),
            ));
        }
        Ok(Self {
            id,
            name,
            duration_days,
            price,
            max_entries,
            max_freeze_days,
            is_active: true,
        })
    }

    /// Marks the type as no longer sold.
    pub fn retire(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// End date of a cycle starting on `start_date`, or None when it would
    /// fall past the last representable date.
    pub fn end_date_from(&self, start_date: CalendarDate) -> Option<CalendarDate> {
        start_date.checked_plus_days(i64::from(self.duration_days))
    }

    pub fn has_entry_limit(&self) -> bool {
        self.max_entries.is_some()
    }

    pub fn allows_freezing(&self) -> bool {
        self.max_freeze_days > 0
    }
}
