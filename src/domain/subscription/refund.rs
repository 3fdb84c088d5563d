//! Refund policies applied when a subscription is cancelled.
//!
//! Clubs differ on refunds, so the policy is injected rather than hard-coded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{CalendarDate, Money};

use super::Subscription;

/// Computes how much of the paid amount goes back to the member.
pub trait RefundPolicy: Send + Sync {
    /// Refund owed if `sub` is cancelled on `today`. Never negative.
    fn refund_amount(&self, sub: &Subscription, today: CalendarDate) -> Money;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Keeps everything that was paid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefund;

impl RefundPolicy for NoRefund {
    fn refund_amount(&self, _sub: &Subscription, _today: CalendarDate) -> Money {
        Money::ZERO
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Returns the paid amount in proportion to unused days.
///
/// The window is inclusive on both ends and the cancellation day counts as
/// used. Cancelling before the start refunds everything paid; cancelling
/// after the end refunds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProRataRefund;

impl ProRataRefund {
    fn unused_days(sub: &Subscription, today: CalendarDate) -> (i64, i64) {
        let total = sub.end_date.days_since(&sub.start_date) + 1;
        let unused = if today < sub.start_date {
            total
        } else if today > sub.end_date {
            0
        } else {
            sub.end_date.days_since(&today)
        };
        (unused, total)
    }
}

impl RefundPolicy for ProRataRefund {
    fn refund_amount(&self, sub: &Subscription, today: CalendarDate) -> Money {
        if !sub.paid_amount.is_positive() {
            return Money::ZERO;
        }
        let (unused, total) = Self::unused_days(sub, today);
        if total <= 0 || unused <= 0 {
            return Money::ZERO;
        }
        let share = sub.paid_amount.amount() * Decimal::from(unused) / Decimal::from(total);
        Money::rounded(share).clamp_between(Money::ZERO, sub.paid_amount)
    }

    fn name(&self) -> &'static str {
        "pro_rata"
    }
}

/// Configurable choice of refund policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundPolicyKind {
    #[default]
    None,
    ProRata,
}

impl RefundPolicyKind {
    pub fn build(&self) -> Arc<dyn RefundPolicy> {
        match self {
            RefundPolicyKind::None => Arc::new(NoRefund),
            RefundPolicyKind::ProRata => Arc::new(ProRataRefund),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::test_support::{date, money, subscription_between};

    #[test]
    fn no_refund_is_always_zero() {
        let sub = subscription_between("2024-01-01", "2024-01-10", "300.00", "300.00");
        assert_eq!(NoRefund.refund_amount(&sub, date("2024-01-02")), Money::ZERO);
    }

    #[test]
    fn pro_rata_refunds_unused_share() {
        // 10-day window, cancelled on day 4: days 5..10 unused (6 of 10).
        let sub = subscription_between("2024-01-01", "2024-01-10", "300.00", "300.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-04")),
            money("180.00")
        );
    }

    #[test]
    fn pro_rata_uses_paid_not_price() {
        let sub = subscription_between("2024-01-01", "2024-01-10", "300.00", "100.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-04")),
            money("60.00")
        );
    }

    #[test]
    fn pro_rata_before_start_refunds_all_paid() {
        let sub = subscription_between("2024-02-01", "2024-02-10", "300.00", "150.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-20")),
            money("150.00")
        );
    }

    #[test]
    fn pro_rata_after_end_refunds_nothing() {
        let sub = subscription_between("2024-01-01", "2024-01-10", "300.00", "300.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-20")),
            Money::ZERO
        );
    }

    #[test]
    fn pro_rata_rounds_to_cents() {
        // 3-day window, cancelled on first day: 2 of 3 unused.
        let sub = subscription_between("2024-01-01", "2024-01-03", "100.00", "100.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-01")),
            money("66.67")
        );
    }

    #[test]
    fn pro_rata_with_nothing_paid_is_zero() {
        let sub = subscription_between("2024-01-01", "2024-01-10", "300.00", "0.00");
        assert_eq!(
            ProRataRefund.refund_amount(&sub, date("2024-01-02")),
            Money::ZERO
        );
    }

    #[test]
    fn kind_builds_matching_policy() {
        assert_eq!(RefundPolicyKind::None.build().name(), "none");
        assert_eq!(RefundPolicyKind::ProRata.build().name(), "pro_rata");
    }

    #[test]
    fn kind_deserializes_snake_case() {
        let kind: RefundPolicyKind = serde_json::from_str("\"pro_rata\"").unwrap();
        assert_eq!(kind, RefundPolicyKind::ProRata);
    }
}
