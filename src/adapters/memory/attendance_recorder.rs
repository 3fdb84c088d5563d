//! In-memory AttendanceRecorder.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{CalendarDate, DomainError, ErrorCode, MemberId, SubscriptionId};
use crate::ports::AttendanceRecorder;

/// One recorded visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub subscription_id: SubscriptionId,
    pub member_id: MemberId,
    pub on: CalendarDate,
}

/// Keeps every visit in arrival order.
#[derive(Default)]
pub struct InMemoryAttendanceRecorder {
    visits: RwLock<Vec<Visit>>,
}

impl InMemoryAttendanceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.visits
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Visits recorded against one subscription.
    pub fn visits_for(&self, subscription_id: &SubscriptionId) -> usize {
        self.visits
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|v| &v.subscription_id == subscription_id)
            .count()
    }
}

#[async_trait]
impl AttendanceRecorder for InMemoryAttendanceRecorder {
    async fn record_entry(
        &self,
        subscription_id: &SubscriptionId,
        member_id: &MemberId,
        on: CalendarDate,
    ) -> Result<(), DomainError> {
        self.visits
            .write()
            .map_err(|_| DomainError::new(ErrorCode::DatabaseError, "attendance lock poisoned"))?
            .push(Visit {
                subscription_id: *subscription_id,
                member_id: *member_id,
                on,
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_visits_per_subscription() {
        let recorder = InMemoryAttendanceRecorder::new();
        let sub = SubscriptionId::new();
        let member = MemberId::new();
        let day: CalendarDate = "2024-01-15".parse().unwrap();

        recorder.record_entry(&sub, &member, day).await.unwrap();
        recorder.record_entry(&sub, &member, day).await.unwrap();
        recorder
            .record_entry(&SubscriptionId::new(), &member, day)
            .await
            .unwrap();

        assert_eq!(recorder.visits_for(&sub), 2);
        assert_eq!(recorder.visits().len(), 3);
        assert_eq!(recorder.visits()[0].on, day);
    }
}
