//! In-memory wiring shared by the handler tests.

use std::sync::Arc;

use crate::adapters::{
    FixedClock, InMemoryAttendanceRecorder, InMemoryEventBus, InMemoryPaymentLedger,
    InMemorySubscriptionRepository, InMemorySubscriptionTypeCatalog,
};
use crate::domain::foundation::{
    CalendarDate, ClubId, MemberId, Money, SubscriptionId, SubscriptionTypeId, Timestamp,
};
use crate::domain::subscription::{Subscription, SubscriptionType};
use crate::ports::SubscriptionRepository;

pub(crate) fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

pub(crate) fn money(s: &str) -> Money {
    s.parse().unwrap()
}

pub(crate) struct Harness {
    pub repository: Arc<InMemorySubscriptionRepository>,
    pub catalog: Arc<InMemorySubscriptionTypeCatalog>,
    pub ledger: Arc<InMemoryPaymentLedger>,
    pub attendance: Arc<InMemoryAttendanceRecorder>,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    /// 30 days, 500.00, unlimited entries, 15 freeze days.
    pub monthly: SubscriptionType,
}

impl Harness {
    pub fn new(today: &str) -> Self {
        let monthly = SubscriptionType::new(
            SubscriptionTypeId::new(),
            "Monthly unlimited",
            30,
            money("500.00"),
            None,
            15,
        )
        .unwrap();
        Self {
            repository: Arc::new(InMemorySubscriptionRepository::new()),
            catalog: Arc::new(InMemorySubscriptionTypeCatalog::with_types([monthly.clone()])),
            ledger: Arc::new(InMemoryPaymentLedger::new()),
            attendance: Arc::new(InMemoryAttendanceRecorder::new()),
            bus: Arc::new(InMemoryEventBus::new()),
            clock: Arc::new(FixedClock::new(date(today))),
            monthly,
        }
    }

    /// Stores a monthly subscription over an explicit window.
    pub async fn seed(&self, start: &str, end: &str, paid: &str) -> Subscription {
        let now = Timestamp::now();
        let sub = Subscription {
            id: SubscriptionId::new(),
            member_id: MemberId::new(),
            club_id: ClubId::new(),
            type_id: self.monthly.id,
            coach_id: None,
            start_date: date(start),
            end_date: date(end),
            price: self.monthly.price,
            paid_amount: money(paid),
            entry_count: 0,
            max_entries: self.monthly.max_entries,
            freeze_requests: Vec::new(),
            is_cancelled: false,
            cancelled_on: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.repository.save(&sub).await.unwrap();
        sub
    }

    pub async fn reload(&self, id: SubscriptionId) -> Subscription {
        self.repository.find_by_id(&id).await.unwrap().unwrap()
    }
}
