//! Shared fixtures for subscription tests.

use crate::domain::foundation::{
    CalendarDate, ClubId, MemberId, Money, SubscriptionId, SubscriptionTypeId, Timestamp,
};

use super::{NewSubscription, Subscription, SubscriptionType};

pub(crate) fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

pub(crate) fn money(s: &str) -> Money {
    s.parse().unwrap()
}

pub(crate) fn now() -> Timestamp {
    Timestamp::now()
}

/// 30 days, 500.00, unlimited entries, freezes up to 15 days.
pub(crate) fn monthly_type() -> SubscriptionType {
    SubscriptionType::new(
        SubscriptionTypeId::new(),
        "Monthly unlimited",
        30,
        money("500.00"),
        None,
        15,
    )
    .unwrap()
}

/// 60 days, 120.00, ten entries, no freezing.
pub(crate) fn ten_visit_type() -> SubscriptionType {
    SubscriptionType::new(
        SubscriptionTypeId::new(),
        "10-visit pass",
        60,
        money("120.00"),
        Some(10),
        0,
    )
    .unwrap()
}

pub(crate) fn new_subscription(
    sub_type: &SubscriptionType,
    start: &str,
    initial_payment: &str,
) -> NewSubscription {
    NewSubscription {
        member_id: MemberId::new(),
        club_id: ClubId::new(),
        type_id: sub_type.id,
        coach_id: None,
        start_date: date(start),
        initial_payment: money(initial_payment),
    }
}

/// A subscription over an explicit window, bypassing type lookup.
pub(crate) fn subscription_between(start: &str, end: &str, price: &str, paid: &str) -> Subscription {
    let ts = now();
    Subscription {
        id: SubscriptionId::new(),
        member_id: MemberId::new(),
        club_id: ClubId::new(),
        type_id: SubscriptionTypeId::new(),
        coach_id: None,
        start_date: date(start),
        end_date: date(end),
        price: money(price),
        paid_amount: money(paid),
        entry_count: 0,
        max_entries: None,
        freeze_requests: Vec::new(),
        is_cancelled: false,
        cancelled_on: None,
        version: 0,
        created_at: ts,
        updated_at: ts,
    }
}
