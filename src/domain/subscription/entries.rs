//! Entry allowance read model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many more visits a subscription allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "remaining")]
pub enum EntryAllowance {
    Unlimited,
    Limited(u32),
}

impl EntryAllowance {
    /// Allowance left after `entry_count` visits against an optional cap.
    pub fn from_counts(max_entries: Option<u32>, entry_count: u32) -> Self {
        match max_entries {
            None => EntryAllowance::Unlimited,
            Some(max) => EntryAllowance::Limited(max.saturating_sub(entry_count)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, EntryAllowance::Limited(0))
    }
}

impl fmt::Display for EntryAllowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryAllowance::Unlimited => write!(f, "unlimited"),
            EntryAllowance::Limited(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cap_is_unlimited() {
        assert_eq!(EntryAllowance::from_counts(None, 500), EntryAllowance::Unlimited);
    }

    #[test]
    fn cap_subtracts_count() {
        assert_eq!(EntryAllowance::from_counts(Some(10), 9), EntryAllowance::Limited(1));
    }

    #[test]
    fn count_over_cap_saturates_at_zero() {
        let allowance = EntryAllowance::from_counts(Some(10), 12);
        assert_eq!(allowance, EntryAllowance::Limited(0));
        assert!(allowance.is_exhausted());
    }

    #[test]
    fn displays_unlimited_or_number() {
        assert_eq!(EntryAllowance::Unlimited.to_string(), "unlimited");
        assert_eq!(EntryAllowance::Limited(3).to_string(), "3");
    }
}
