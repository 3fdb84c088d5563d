//! Read model for front-desk and member views.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CalendarDate, ClubId, CoachId, MemberId, Money, SubscriptionId, SubscriptionTypeId,
};

use super::{EntryAllowance, FreezeRequest, Subscription, SubscriptionStatus};

/// A subscription as seen on a given day, with every derived value resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    pub id: SubscriptionId,
    pub member_id: MemberId,
    pub club_id: ClubId,
    pub type_id: SubscriptionTypeId,
    pub coach_id: Option<CoachId>,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub status: SubscriptionStatus,
    pub price: Money,
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub entry_count: u32,
    pub remaining_entries: EntryAllowance,
    pub days_remaining: u32,
    pub active_freeze: Option<FreezeRequest>,
    pub freeze_history: Vec<FreezeRequest>,
    pub is_cancelled: bool,
    pub version: u64,
    /// Day the derived fields were computed for.
    pub as_of: CalendarDate,
}

impl SubscriptionView {
    pub fn of(sub: &Subscription, today: CalendarDate) -> Self {
        Self {
            id: sub.id,
            member_id: sub.member_id,
            club_id: sub.club_id,
            type_id: sub.type_id,
            coach_id: sub.coach_id,
            start_date: sub.start_date,
            end_date: sub.end_date,
            status: sub.status(today),
            price: sub.price,
            paid_amount: sub.paid_amount,
            remaining_amount: sub.remaining_amount(),
            entry_count: sub.entry_count,
            remaining_entries: sub.remaining_entries(),
            days_remaining: sub.days_remaining(today),
            active_freeze: sub
                .active_freeze()
                .filter(|f| !f.has_elapsed(today))
                .cloned(),
            freeze_history: sub.freeze_requests.clone(),
            is_cancelled: sub.is_cancelled,
            version: sub.version,
            as_of: today,
        }
    }

    /// True when the member still owes money.
    pub fn has_balance_due(&self) -> bool {
        self.remaining_amount.is_positive()
    }
}
