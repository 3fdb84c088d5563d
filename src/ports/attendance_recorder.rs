//! Attendance port.
//!
//! The lifecycle engine decides whether a visit may happen and keeps the
//! entry count. The attendance system behind this port stores the visit
//! itself, after the slot has been persisted.

use crate::domain::foundation::{CalendarDate, DomainError, MemberId, SubscriptionId};
use async_trait::async_trait;

#[async_trait]
pub trait AttendanceRecorder: Send + Sync {
    /// Records one admitted visit.
    async fn record_entry(
        &self,
        subscription_id: &SubscriptionId,
        member_id: &MemberId,
        on: CalendarDate,
    ) -> Result<(), DomainError>;
}
