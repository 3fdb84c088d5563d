//! Subscription aggregate entity.
//!
//! A Subscription is one member's paid term at a club for a given
//! subscription type. All lifecycle rules live on this type as methods that
//! take "today" explicitly; nothing here reads the wall clock.
//!
//! # Design Decisions
//!
//! - **Derived status**: status is computed by [`derive_status`], never stored
//! - **Exact money**: balances are [`Money`] and always recomputed as `price - paid`
//! - **Validate before mutate**: a rejected operation leaves the aggregate untouched
//! - **Optimistic versioning**: every mutation bumps `version`; the repository
//!   refuses writes whose base version is stale

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CalendarDate, ClubId, CoachId, FreezeRequestId, MemberId, Money, SubscriptionId,
    SubscriptionTypeId, Timestamp,
};

use super::{
    derive_status, EntryAllowance, FreezeRequest, FreezeRequestInput, PaymentRequest,
    RefundPolicy, SubscriptionError, SubscriptionStatus, SubscriptionType,
};

/// Subscription aggregate.
///
/// # Invariants
///
/// - At most one freeze request is active
/// - `freeze_requests` is in creation order
/// - `start_date <= end_date`
/// - `price >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub type_id: SubscriptionTypeId,
    pub coach_id: Option<CoachId>,

    /// First active day.
    pub start_date: CalendarDate,
    /// Last active day.
    pub end_date: CalendarDate,

    pub price: Money,
    pub paid_amount: Money,

    /// Visits recorded so far, maintained by the attendance recorder.
    pub entry_count: u32,
    /// Visit cap copied from the type. None = unlimited.
    pub max_entries: Option<u32>,

    pub freeze_requests: Vec<FreezeRequest>,

    pub is_cancelled: bool,
    pub cancelled_on: Option<CalendarDate>,

    /// Bumped on every mutation.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for selling a new subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub type_id: SubscriptionTypeId,
    pub coach_id: Option<CoachId>,
    pub start_date: CalendarDate,
    pub initial_payment: Money,
}

/// Editable fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    #[serde(default)]
    pub start_date: Option<CalendarDate>,
    #[serde(default)]
    pub end_date: Option<CalendarDate>,
    /// `Some(None)` removes the coach.
    #[serde(default)]
    pub coach_id: Option<Option<CoachId>>,
    #[serde(default)]
    pub price: Option<Money>,
}

impl SubscriptionUpdate {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.coach_id.is_none()
            && self.price.is_none()
    }
}

/// Input for starting a new cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalRequest {
    /// Switch to another type; None keeps the current one.
    pub new_type_id: Option<SubscriptionTypeId>,
    /// First day of the new cycle; None means today.
    pub start_date: Option<CalendarDate>,
    /// Payment taken for the new cycle; its amount becomes `paid_amount`.
    pub payment: PaymentRequest,
}

impl RenewalRequest {
    /// The type the renewed cycle will use.
    pub fn target_type_id(&self, current: SubscriptionTypeId) -> SubscriptionTypeId {
        self.new_type_id.unwrap_or(current)
    }
}

/// The cycle a renewal replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalOutcome {
    pub previous_type_id: SubscriptionTypeId,
    pub previous_start_date: CalendarDate,
    pub previous_end_date: CalendarDate,
    pub previous_remaining_amount: Money,
}

/// Result of cancelling a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub refund_amount: Money,
    pub cancelled_on: CalendarDate,
    pub refund_policy: String,
}

impl Subscription {
    /// Sells a new subscription of `sub_type`.
    ///
    /// # Errors
    ///
    /// - `DataIntegrity` if `sub_type` is not the type named in `new`
    /// - `UnknownType` if the type is retired
    /// - `InvalidAmount` if the initial payment is negative
    /// - `ExceedsRemaining` if the initial payment is above the price
    /// - `InvalidStartDate` if the cycle would end past the last representable date
    pub fn create(
        id: SubscriptionId,
        new: NewSubscription,
        sub_type: &SubscriptionType,
        now: Timestamp,
    ) -> Result<Self, SubscriptionError> {
        if sub_type.id != new.type_id {
            return Err(SubscriptionError::data_integrity(format!(
                "type {} was supplied for a subscription of type {}",
                sub_type.id, new.type_id
            )));
        }
        if !sub_type.is_active {
            return Err(SubscriptionError::UnknownType(sub_type.id));
        }
        if new.initial_payment.is_negative() {
            return Err(SubscriptionError::invalid_amount(
                new.initial_payment,
                "initial payment cannot be negative",
            ));
        }
        if new.initial_payment > sub_type.price {
            return Err(SubscriptionError::exceeds_remaining(
                new.initial_payment,
                sub_type.price,
            ));
        }
        let end_date = cycle_end(sub_type, new.start_date)?;

        Ok(Self {
            id,
            member_id: new.member_id,
            club_id: new.club_id,
            type_id: sub_type.id,
            coach_id: new.coach_id,
            start_date: new.start_date,
            end_date,
            price: sub_type.price,
            paid_amount: new.initial_payment,
            entry_count: 0,
            max_entries: sub_type.max_entries,
            freeze_requests: Vec::new(),
            is_cancelled: false,
            cancelled_on: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Status on `today`. See [`derive_status`].
    pub fn status(&self, today: CalendarDate) -> SubscriptionStatus {
        derive_status(self, today)
    }

    /// Outstanding balance, `price - paid_amount`. Negative when overpaid.
    pub fn remaining_amount(&self) -> Money {
        self.price - self.paid_amount
    }

    /// The freeze request currently marked active, if any.
    pub fn active_freeze(&self) -> Option<&FreezeRequest> {
        self.freeze_requests.iter().find(|f| f.is_active())
    }

    /// Finds a freeze request by id.
    pub fn freeze_request(&self, id: FreezeRequestId) -> Option<&FreezeRequest> {
        self.freeze_requests.iter().find(|f| f.id == id)
    }

    /// Visits left in this cycle.
    pub fn remaining_entries(&self) -> EntryAllowance {
        EntryAllowance::from_counts(self.max_entries, self.entry_count)
    }

    /// Whole days from `today` to the last active day; zero once past it.
    pub fn days_remaining(&self, today: CalendarDate) -> u32 {
        let days = self.end_date.days_since(&today).max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Decides whether one more visit may be recorded on `today`.
    ///
    /// # Errors
    ///
    /// - `NotActive` unless the status is Active
    /// - `NoEntriesRemaining` if a cap exists and is reached
    pub fn can_admit_entry(&self, today: CalendarDate) -> Result<EntryAllowance, SubscriptionError> {
        let status = self.status(today);
        if !status.is_active() {
            return Err(SubscriptionError::NotActive(status));
        }
        if let Some(max_entries) = self.max_entries {
            if self.entry_count >= max_entries {
                return Err(SubscriptionError::NoEntriesRemaining { max_entries });
            }
        }
        Ok(self.remaining_entries())
    }

    /// Takes one entry slot and returns the allowance left after it.
    ///
    /// The slot must be persisted before the visit is written anywhere else,
    /// so that a stale copy cannot admit past the cap.
    ///
    /// # Errors
    ///
    /// Same as [`Subscription::can_admit_entry`].
    pub fn admit_entry(
        &mut self,
        today: CalendarDate,
        now: Timestamp,
    ) -> Result<EntryAllowance, SubscriptionError> {
        self.can_admit_entry(today)?;
        self.entry_count = self.entry_count.saturating_add(1);
        self.touch(now);
        Ok(self.remaining_entries())
    }

    /// Applies a payment against the outstanding balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ExceedsRemaining` if `amount` is more than the remaining balance
    pub fn apply_payment(&mut self, amount: Money, now: Timestamp) -> Result<(), SubscriptionError> {
        if !amount.is_positive() {
            return Err(SubscriptionError::invalid_amount(
                amount,
                "payment must be greater than zero",
            ));
        }
        let remaining = self.remaining_amount();
        if amount > remaining {
            return Err(SubscriptionError::exceeds_remaining(amount, remaining));
        }
        self.paid_amount = self.paid_amount + amount;
        self.touch(now);
        Ok(())
    }

    /// Adds a freeze request.
    ///
    /// Freezes whose window is already over do not count as active and are
    /// settled to `Elapsed` on success. The end date is left unchanged.
    ///
    /// # Errors
    ///
    /// In order: `InvalidDays`, `InvalidStartDate`, `ExceedsMaxFreeze`,
    /// `AlreadyFrozen`, `SubscriptionNotActive`.
    pub fn request_freeze(
        &mut self,
        input: FreezeRequestInput,
        today: CalendarDate,
        max_freeze_days: u32,
        now: Timestamp,
    ) -> Result<FreezeRequest, SubscriptionError> {
        let (requested_days, start_date) = input.validate(today, max_freeze_days)?;

        if let Some(existing) = self
            .freeze_requests
            .iter()
            .find(|f| f.is_active() && !f.has_elapsed(today))
        {
            return Err(SubscriptionError::AlreadyFrozen(existing.id));
        }

        let status = self.status(today);
        if !status.is_active() {
            return Err(SubscriptionError::SubscriptionNotActive(status));
        }

        self.settle_freezes(today);
        let freeze = FreezeRequest::new(FreezeRequestId::new(), self.id, requested_days, start_date);
        self.freeze_requests.push(freeze.clone());
        self.touch(now);
        Ok(freeze)
    }

    /// Cancels a freeze request.
    ///
    /// Permission is checked by the caller before this is reached.
    ///
    /// # Errors
    ///
    /// - `FreezeNotFound` if no freeze with that id belongs to this subscription
    /// - `FreezeNotActive` if it was already cancelled or has elapsed
    pub fn cancel_freeze(
        &mut self,
        freeze_id: FreezeRequestId,
        today: CalendarDate,
        now: Timestamp,
    ) -> Result<FreezeRequest, SubscriptionError> {
        let freeze = self
            .freeze_requests
            .iter_mut()
            .find(|f| f.id == freeze_id)
            .ok_or(SubscriptionError::FreezeNotFound(freeze_id))?;
        if freeze.has_elapsed(today) {
            return Err(SubscriptionError::FreezeNotActive(freeze_id));
        }
        freeze.cancel(today)?;
        let cancelled = freeze.clone();
        self.touch(now);
        Ok(cancelled)
    }

    /// Marks every active freeze whose window is over as elapsed.
    ///
    /// Returns the ids that changed.
    pub fn settle_freezes(&mut self, today: CalendarDate) -> Vec<FreezeRequestId> {
        self.freeze_requests
            .iter_mut()
            .filter_map(|f| f.settle(today).then_some(f.id))
            .collect()
    }

    /// Starts a new cycle.
    ///
    /// `sub_type` is the catalogue entry for
    /// [`RenewalRequest::target_type_id`], or None if the catalogue has no
    /// such entry.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the payment is negative
    /// - `UnknownType` if a requested new type is missing or any target type is retired
    /// - `ExceedsRemaining` if the payment is above the new price
    /// - `InvalidStartDate` if the cycle would end past the last representable date
    /// - `DataIntegrity` if the current type is missing from the catalogue
    pub fn renew(
        &mut self,
        request: &RenewalRequest,
        sub_type: Option<&SubscriptionType>,
        today: CalendarDate,
        now: Timestamp,
    ) -> Result<RenewalOutcome, SubscriptionError> {
        let amount = request.payment.amount;
        if amount.is_negative() {
            return Err(SubscriptionError::invalid_amount(
                amount,
                "renewal payment cannot be negative",
            ));
        }

        let target_id = request.target_type_id(self.type_id);
        let sub_type = match (sub_type, request.new_type_id) {
            (Some(t), _) if t.id == target_id => t,
            (Some(t), _) => {
                return Err(SubscriptionError::data_integrity(format!(
                    "catalogue returned type {} for {}",
                    t.id, target_id
                )))
            }
            (None, Some(new_type_id)) => return Err(SubscriptionError::UnknownType(new_type_id)),
            (None, None) => {
                return Err(SubscriptionError::data_integrity(format!(
                    "subscription {} references missing type {}",
                    self.id, self.type_id
                )))
            }
        };
        if !sub_type.is_active {
            return Err(SubscriptionError::UnknownType(sub_type.id));
        }
        if amount > sub_type.price {
            return Err(SubscriptionError::exceeds_remaining(amount, sub_type.price));
        }

        let outcome = RenewalOutcome {
            previous_type_id: self.type_id,
            previous_start_date: self.start_date,
            previous_end_date: self.end_date,
            previous_remaining_amount: self.remaining_amount(),
        };

        let start_date = request.start_date.unwrap_or(today);
        let end_date = cycle_end(sub_type, start_date)?;
        for freeze in self.freeze_requests.iter_mut().filter(|f| f.is_active()) {
            if !freeze.settle(today) {
                freeze.cancel(today)?;
            }
        }
        self.type_id = sub_type.id;
        self.start_date = start_date;
        self.end_date = end_date;
        self.price = sub_type.price;
        self.paid_amount = amount;
        self.max_entries = sub_type.max_entries;
        self.entry_count = 0;
        self.is_cancelled = false;
        self.cancelled_on = None;
        self.touch(now);
        Ok(outcome)
    }

    /// Cancels the subscription and computes the refund.
    ///
    /// Any active freeze is cancelled along with it.
    ///
    /// # Errors
    ///
    /// `AlreadyCancelled` if the subscription is already cancelled.
    pub fn cancel(
        &mut self,
        today: CalendarDate,
        policy: &dyn RefundPolicy,
        now: Timestamp,
    ) -> Result<Cancellation, SubscriptionError> {
        if self.is_cancelled {
            return Err(SubscriptionError::AlreadyCancelled(self.id));
        }
        let refund_amount = policy.refund_amount(self, today);

        for freeze in self.freeze_requests.iter_mut().filter(|f| f.is_active()) {
            if !freeze.settle(today) {
                freeze.cancel(today)?;
            }
        }
        self.is_cancelled = true;
        self.cancelled_on = Some(today);
        self.touch(now);

        Ok(Cancellation {
            refund_amount,
            cancelled_on: today,
            refund_policy: policy.name().to_string(),
        })
    }

    /// Edits dates, coach or price.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the new price is negative
    /// - `InvalidDateRange` if the resulting start is after the resulting end
    pub fn update(&mut self, changes: &SubscriptionUpdate, now: Timestamp) -> Result<(), SubscriptionError> {
        if let Some(price) = changes.price {
            if price.is_negative() {
                return Err(SubscriptionError::invalid_amount(price, "price cannot be negative"));
            }
        }
        let start_date = changes.start_date.unwrap_or(self.start_date);
        let end_date = changes.end_date.unwrap_or(self.end_date);
        if start_date > end_date {
            return Err(SubscriptionError::InvalidDateRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        if changes.is_empty() {
            return Ok(());
        }
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(coach_id) = changes.coach_id {
            self.coach_id = coach_id;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.touch(now);
        Ok(())
    }

    fn touch(&mut self, now: Timestamp) {
        self.version += 1;
        self.updated_at = now;
    }
}

fn cycle_end(
    sub_type: &SubscriptionType,
    start_date: CalendarDate,
) -> Result<CalendarDate, SubscriptionError> {
    sub_type.end_date_from(start_date).ok_or_else(|| {
        SubscriptionError::invalid_start_date(format!(
            "{} plus {} days is past the last supported date",
            start_date, sub_type.duration_days
        ))
    })
}
