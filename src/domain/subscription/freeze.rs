//! Freeze requests: bounded pauses of a subscription.
//!
//! A freeze covers the half-open window `[start_date, start_date + requested_days)`.
//! Only one freeze per subscription may be active at a time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CalendarDate, FreezeRequestId, StateMachine, SubscriptionId};

use super::SubscriptionError;

/// Stored lifecycle of a freeze request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezeState {
    /// Pending or running; blocks further freeze requests.
    Active,

    /// Withdrawn by staff before or during the window.
    Cancelled,

    /// The window has passed.
    Elapsed,
}

impl StateMachine for FreezeState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FreezeState::*;
        matches!((self, target), (Active, Cancelled) | (Active, Elapsed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FreezeState::*;
        match self {
            Active => vec![Cancelled, Elapsed],
            Cancelled | Elapsed => vec![],
        }
    }
}

/// A request to pause a subscription for a number of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRequest {
    pub id: FreezeRequestId,
    pub subscription_id: SubscriptionId,
    pub requested_days: u32,
    pub start_date: CalendarDate,
    pub state: FreezeState,
    /// Day the request was cancelled, if it was.
    pub cancelled_on: Option<CalendarDate>,
}

impl FreezeRequest {
    /// Creates an active freeze request. Inputs are assumed validated.
    pub fn new(
        id: FreezeRequestId,
        subscription_id: SubscriptionId,
        requested_days: u32,
        start_date: CalendarDate,
    ) -> Self {
        Self {
            id,
            subscription_id,
            requested_days,
            start_date,
            state: FreezeState::Active,
            cancelled_on: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == FreezeState::Active
    }

    /// First day after the freeze window.
    pub fn end_date(&self) -> CalendarDate {
        self.start_date.plus_days(i64::from(self.requested_days))
    }

    /// True when `day` falls inside the window, regardless of state.
    pub fn window_contains(&self, day: CalendarDate) -> bool {
        self.start_date <= day && day < self.end_date()
    }

    /// True when the freeze is active and its window contains `day`.
    pub fn covers(&self, day: CalendarDate) -> bool {
        self.is_active() && self.window_contains(day)
    }

    /// True once the whole window lies before `today`.
    pub fn has_elapsed(&self, today: CalendarDate) -> bool {
        today >= self.end_date()
    }

    /// Withdraws the freeze.
    ///
    /// # Errors
    ///
    /// `FreezeNotActive` if the freeze was already cancelled or has elapsed.
    pub fn cancel(&mut self, today: CalendarDate) -> Result<(), SubscriptionError> {
        self.state = self
            .state
            .transition_to(FreezeState::Cancelled)
            .map_err(|_| SubscriptionError::FreezeNotActive(self.id))?;
        self.cancelled_on = Some(today);
        Ok(())
    }

    /// Marks the freeze elapsed if its window is over. Returns true if it changed.
    pub fn settle(&mut self, today: CalendarDate) -> bool {
        if !self.has_elapsed(today) {
            return false;
        }
        match self.state.transition_to(FreezeState::Elapsed) {
            Ok(next) => {
                self.state = next;
                true
            }
            Err(_) => false,
        }
    }
}

/// Raw freeze request as entered by staff.
///
/// `requested_days` is signed and `start_date` optional so that bad input
/// reaches the engine and is rejected with a typed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRequestInput {
    pub requested_days: i64,
    pub start_date: Option<CalendarDate>,
}

impl FreezeRequestInput {
    pub fn new(requested_days: i64, start_date: Option<CalendarDate>) -> Self {
        Self {
            requested_days,
            start_date,
        }
    }

    /// Checks the request on its own, before looking at the subscription.
    ///
    /// Order: `InvalidDays`, `InvalidStartDate`, `ExceedsMaxFreeze`.
    pub fn validate(
        &self,
        today: CalendarDate,
        max_freeze_days: u32,
    ) -> Result<(u32, CalendarDate), SubscriptionError> {
        if self.requested_days <= 0 {
            return Err(SubscriptionError::InvalidDays(self.requested_days));
        }
        let start_date = self
            .start_date
            .ok_or_else(|| SubscriptionError::invalid_start_date("start date is required"))?;
        if start_date < today {
            return Err(SubscriptionError::invalid_start_date(format!(
                "{} is before today ({})",
                start_date, today
            )));
        }
        if self.requested_days > i64::from(max_freeze_days) {
            return Err(SubscriptionError::ExceedsMaxFreeze {
                requested: self.requested_days,
                max: max_freeze_days,
            });
        }
        let days = u32::try_from(self.requested_days).map_err(|_| SubscriptionError::ExceedsMaxFreeze {
            requested: self.requested_days,
            max: max_freeze_days,
        })?;
        Ok((days, start_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn five_day_freeze() -> FreezeRequest {
        FreezeRequest::new(
            FreezeRequestId::new(),
            SubscriptionId::new(),
            5,
            date("2024-01-16"),
        )
    }

    #[test]
    fn active_can_be_cancelled_or_elapse() {
        assert!(FreezeState::Active.can_transition_to(&FreezeState::Cancelled));
        assert!(FreezeState::Active.can_transition_to(&FreezeState::Elapsed));
    }

    #[test]
    fn cancelled_and_elapsed_are_terminal() {
        assert!(FreezeState::Cancelled.is_terminal());
        assert!(FreezeState::Elapsed.is_terminal());
        assert!(!FreezeState::Active.is_terminal());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        for state in [FreezeState::Active, FreezeState::Cancelled, FreezeState::Elapsed] {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn window_is_half_open() {
        let freeze = five_day_freeze();
        assert_eq!(freeze.end_date(), date("2024-01-21"));
        assert!(!freeze.window_contains(date("2024-01-15")));
        assert!(freeze.window_contains(date("2024-01-16")));
        assert!(freeze.window_contains(date("2024-01-20")));
        assert!(!freeze.window_contains(date("2024-01-21")));
    }

    #[test]
    fn cancel_deactivates_and_records_day() {
        let mut freeze = five_day_freeze();
        freeze.cancel(date("2024-01-17")).unwrap();
        assert!(!freeze.is_active());
        assert_eq!(freeze.state, FreezeState::Cancelled);
        assert_eq!(freeze.cancelled_on, Some(date("2024-01-17")));
        assert!(!freeze.covers(date("2024-01-18")));
    }

    #[test]
    fn cancel_twice_fails_with_not_active() {
        let mut freeze = five_day_freeze();
        freeze.cancel(date("2024-01-17")).unwrap();
        let err = freeze.cancel(date("2024-01-18")).unwrap_err();
        assert_eq!(err, SubscriptionError::FreezeNotActive(freeze.id));
    }

    #[test]
    fn settle_marks_only_finished_windows() {
        let mut freeze = five_day_freeze();
        assert!(!freeze.settle(date("2024-01-20")));
        assert!(freeze.is_active());
        assert!(freeze.settle(date("2024-01-21")));
        assert_eq!(freeze.state, FreezeState::Elapsed);
    }

    #[test]
    fn settle_leaves_cancelled_freeze_alone() {
        let mut freeze = five_day_freeze();
        freeze.cancel(date("2024-01-16")).unwrap();
        assert!(!freeze.settle(date("2024-02-01")));
        assert_eq!(freeze.state, FreezeState::Cancelled);
    }

    #[test]
    fn cancelling_elapsed_freeze_fails() {
        let mut freeze = five_day_freeze();
        freeze.settle(date("2024-02-01"));
        assert!(matches!(
            freeze.cancel(date("2024-02-01")),
            Err(SubscriptionError::FreezeNotActive(_))
        ));
    }

    // Input validation

    #[test]
    fn zero_or_negative_days_are_invalid() {
        let today = date("2024-01-15");
        for days in [0, -3] {
            let input = FreezeRequestInput::new(days, Some(today));
            assert_eq!(
                input.validate(today, 15),
                Err(SubscriptionError::InvalidDays(days))
            );
        }
    }

    #[test]
    fn missing_start_date_is_invalid() {
        let input = FreezeRequestInput::new(5, None);
        assert!(matches!(
            input.validate(date("2024-01-15"), 15),
            Err(SubscriptionError::InvalidStartDate { .. })
        ));
    }

    #[test]
    fn past_start_date_is_invalid() {
        let input = FreezeRequestInput::new(5, Some(date("2024-01-14")));
        assert!(matches!(
            input.validate(date("2024-01-15"), 15),
            Err(SubscriptionError::InvalidStartDate { .. })
        ));
    }

    #[test]
    fn days_above_cap_are_rejected() {
        let today = date("2024-01-15");
        let input = FreezeRequestInput::new(20, Some(today));
        assert_eq!(
            input.validate(today, 15),
            Err(SubscriptionError::ExceedsMaxFreeze {
                requested: 20,
                max: 15
            })
        );
    }

    #[test]
    fn days_at_cap_are_accepted() {
        let today = date("2024-01-15");
        let input = FreezeRequestInput::new(15, Some(today));
        assert_eq!(input.validate(today, 15), Ok((15, today)));
    }

    #[test]
    fn invalid_days_is_checked_before_missing_date() {
        let input = FreezeRequestInput::new(0, None);
        assert_eq!(
            input.validate(date("2024-01-15"), 15),
            Err(SubscriptionError::InvalidDays(0))
        );
    }
}
