//! Lifecycle engine configuration

use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::SystemClock;
use crate::domain::subscription::{RefundPolicy, RefundPolicyKind};

use super::error::ValidationError;

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Club-wide lifecycle rules
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// Refund policy applied on cancellation (`none` or `pro_rata`)
    #[serde(default)]
    pub refund_policy: RefundPolicyKind,

    /// Freeze cap used when a subscription's type can no longer be found
    #[serde(default = "default_max_freeze_days")]
    pub default_max_freeze_days: u32,

    /// Offset of the club's business day from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl LifecycleConfig {
    pub fn refund_policy(&self) -> Arc<dyn RefundPolicy> {
        self.refund_policy.build()
    }

    /// Wall clock for the configured business day.
    pub fn clock(&self) -> SystemClock {
        match self.utc_offset_minutes {
            Some(minutes) => SystemClock::with_offset_minutes(minutes),
            None => SystemClock::utc(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_max_freeze_days == 0 {
            return Err(ValidationError::InvalidFreezeCap);
        }
        if let Some(minutes) = self.utc_offset_minutes {
            if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
                return Err(ValidationError::InvalidUtcOffset(minutes));
            }
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            refund_policy: RefundPolicyKind::default(),
            default_max_freeze_days: default_max_freeze_days(),
            utc_offset_minutes: None,
        }
    }
}

fn default_max_freeze_days() -> u32 {
    15
}
