//! Timestamp value object for audit fields and event times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Lifecycle rules never look at timestamps; they work on
/// [`CalendarDate`](super::CalendarDate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_is_monotonic_enough_to_order() {
        let first = Timestamp::now();
        let second = Timestamp::now();
        assert!(first <= second);
    }

    #[test]
    fn timestamp_roundtrips_through_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&ts).unwrap();
        assert!(back.contains("2024-01-15T10:30:00"));
        let again: Timestamp = serde_json::from_str(&back).unwrap();
        assert_eq!(again, ts);
    }
}
