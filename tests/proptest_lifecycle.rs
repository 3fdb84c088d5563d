//! Property-based tests for the subscription lifecycle rules
//!
//! These tests verify:
//! - Status derivation is a pure function of its inputs
//! - Both window boundaries count as Active
//! - Payments only ever raise the paid amount, in exact decimals
//! - A running freeze blocks a second one
//! - The entry cap admits exactly `max_entries` visits

use club_subscriptions::domain::foundation::{
    CalendarDate, ClubId, FreezeRequestId, MemberId, Money, SubscriptionId, SubscriptionTypeId,
    Timestamp,
};
use club_subscriptions::domain::subscription::{
    derive_status, status_from_parts, FreezeRequest, FreezeRequestInput, Subscription,
    SubscriptionError, SubscriptionStatus,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn base_date() -> CalendarDate {
    CalendarDate::from_ymd(2024, 1, 1).unwrap()
}

/// Any day within roughly three years of the base date.
fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (0i64..1100).prop_map(|offset| base_date().plus_days(offset))
}

/// Amounts in cents up to 10,000.00.
fn arb_cents() -> impl Strategy<Value = i64> {
    0i64..1_000_000
}

fn subscription(
    start: CalendarDate,
    end: CalendarDate,
    price: Money,
    paid: Money,
) -> Subscription {
    let now = Timestamp::now();
    Subscription {
        id: SubscriptionId::new(),
        member_id: MemberId::new(),
        club_id: ClubId::new(),
        type_id: SubscriptionTypeId::new(),
        coach_id: None,
        start_date: start,
        end_date: end,
        price,
        paid_amount: paid,
        entry_count: 0,
        max_entries: None,
        freeze_requests: Vec::new(),
        is_cancelled: false,
        cancelled_on: None,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Status Properties
// ============================================================================

proptest! {
    /// Property: deriving status twice from the same inputs gives the same answer
    #[test]
    fn prop_status_is_pure(
        start in arb_date(),
        length in 0i64..400,
        today in arb_date(),
        cancelled in any::<bool>(),
        freeze in proptest::option::of((1u32..30, 0i64..400)),
    ) {
        let end = start.plus_days(length);
        let mut sub = subscription(start, end, Money::ZERO, Money::ZERO);
        sub.is_cancelled = cancelled;
        if let Some((days, offset)) = freeze {
            sub.freeze_requests.push(FreezeRequest::new(
                FreezeRequestId::new(),
                sub.id,
                days,
                start.plus_days(offset),
            ));
        }

        let first = derive_status(&sub, today);
        let second = derive_status(&sub, today);
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            first,
            status_from_parts(today, start, end, cancelled, sub.active_freeze())
        );
    }

    /// Property: cancellation wins over every other input
    #[test]
    fn prop_cancelled_always_wins(start in arb_date(), length in 0i64..400, today in arb_date()) {
        let status = status_from_parts(today, start, start.plus_days(length), true, None);
        prop_assert_eq!(status, SubscriptionStatus::Cancelled);
    }

    /// Property: start and end days are Active, the days outside are not
    #[test]
    fn prop_window_boundaries_are_inclusive(start in arb_date(), length in 0i64..400) {
        let end = start.plus_days(length);
        let status = |today: CalendarDate| status_from_parts(today, start, end, false, None);

        prop_assert_eq!(status(start), SubscriptionStatus::Active);
        prop_assert_eq!(status(end), SubscriptionStatus::Active);
        prop_assert_eq!(status(start.minus_days(1)), SubscriptionStatus::Upcoming);
        prop_assert_eq!(status(end.plus_days(1)), SubscriptionStatus::Expired);
    }
}

// ============================================================================
// Payment Properties
// ============================================================================

proptest! {
    /// Property: a payment either raises `paid_amount` by exactly the amount
    /// or fails and leaves the subscription untouched
    #[test]
    fn prop_payment_is_monotonic(
        price_cents in arb_cents(),
        paid_share in 0.0f64..=1.0,
        amount_cents in 1i64..1_200_000,
    ) {
        let paid_cents = (price_cents as f64 * paid_share) as i64;
        let price = Money::from_cents(price_cents);
        let paid = Money::from_cents(paid_cents);
        let amount = Money::from_cents(amount_cents);
        let mut sub = subscription(base_date(), base_date().plus_days(30), price, paid);
        let before = sub.clone();

        match sub.apply_payment(amount, Timestamp::now()) {
            Ok(()) => {
                prop_assert!(amount_cents <= price_cents - paid_cents);
                prop_assert_eq!(sub.paid_amount, paid + amount);
                prop_assert!(sub.paid_amount >= before.paid_amount);
                prop_assert_eq!(sub.remaining_amount(), price - sub.paid_amount);
                prop_assert_eq!(sub.version, before.version + 1);
            }
            Err(err) => {
                prop_assert!(matches!(err, SubscriptionError::ExceedsRemaining { .. }), "unexpected error: {:?}", err);
                prop_assert_eq!(sub, before);
            }
        }
    }

    /// Property: nothing can be paid on a settled balance
    #[test]
    fn prop_settled_balance_rejects_any_payment(price_cents in arb_cents(), amount_cents in 1i64..100_000) {
        let price = Money::from_cents(price_cents);
        let mut sub = subscription(base_date(), base_date().plus_days(30), price, price);

        let result = sub.apply_payment(Money::from_cents(amount_cents), Timestamp::now());
        let is_exceeds_remaining = matches!(result, Err(SubscriptionError::ExceedsRemaining { .. }));
        prop_assert!(is_exceeds_remaining);
        prop_assert_eq!(sub.paid_amount, price);
    }
}

// ============================================================================
// Freeze and Entry Properties
// ============================================================================

proptest! {
    /// Property: while a freeze is running a second request is AlreadyFrozen
    #[test]
    fn prop_second_freeze_is_rejected(
        first_days in 1i64..=15,
        first_offset in 0i64..5,
        second_days in 1i64..=15,
    ) {
        let today = base_date();
        let mut sub = subscription(today, today.plus_days(60), Money::ZERO, Money::ZERO);
        sub.request_freeze(
            FreezeRequestInput::new(first_days, Some(today.plus_days(first_offset))),
            today,
            15,
            Timestamp::now(),
        )
        .unwrap();

        let second = sub.request_freeze(
            FreezeRequestInput::new(second_days, Some(today)),
            today,
            15,
            Timestamp::now(),
        );
        prop_assert!(matches!(second, Err(SubscriptionError::AlreadyFrozen(_))));
        prop_assert_eq!(sub.freeze_requests.len(), 1);
    }

    /// Property: admission succeeds exactly while `entry_count < max_entries`
    #[test]
    fn prop_entry_cap_is_exact(max in 1u32..60, count in 0u32..80) {
        let mut sub = subscription(base_date(), base_date().plus_days(30), Money::ZERO, Money::ZERO);
        sub.max_entries = Some(max);
        sub.entry_count = count;

        let result = sub.can_admit_entry(base_date());
        if count < max {
            prop_assert!(result.is_ok());
        } else {
            let is_no_entries = matches!(result, Err(SubscriptionError::NoEntriesRemaining { .. }));
            prop_assert!(is_no_entries);
        }
    }
}
