//! Clock adapters.

use std::sync::RwLock;

use chrono::{FixedOffset, Offset, Utc};

use crate::domain::foundation::{CalendarDate, Timestamp};
use crate::ports::Clock;

/// Wall clock. The business day is taken in the club's UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// A clock whose business day follows UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// A clock whose business day follows `offset_minutes` east of UTC.
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn with_offset_minutes(offset_minutes: i32) -> Self {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(Utc::now().with_timezone(&self.offset).date_naive())
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<CalendarDate>,
}

impl FixedClock {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    pub fn set_today(&self, today: CalendarDate) {
        *self
            .today
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = today;
    }

    pub fn advance_days(&self, days: i64) {
        let next = self.today().plus_days(days);
        self.set_today(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        *self
            .today
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
