//! Clock port.
//!
//! The domain never reads the wall clock. Handlers ask this port for the
//! business day and the audit instant and pass both down explicitly.

use crate::domain::foundation::{CalendarDate, Timestamp};

pub trait Clock: Send + Sync {
    /// The business day used for status and date rules.
    fn today(&self) -> CalendarDate;

    /// The instant recorded on audit fields and events.
    fn now(&self) -> Timestamp;
}
