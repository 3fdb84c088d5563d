//! Permission port for staff actions on subscriptions.
//!
//! The checker is consulted by the application layer before a domain
//! method runs. It follows a fail-secure rule: an error from the checker is
//! treated as a denial by the handlers.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Subscription;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of a permission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "reason")]
pub enum Permission {
    Granted,
    Denied(String),
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }
}

/// Port for deciding whether a staff user may act on a subscription.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// May `user` withdraw freeze requests on `subscription`?
    async fn can_cancel_freeze(
        &self,
        user: &UserId,
        subscription: &Subscription,
    ) -> Result<Permission, DomainError>;

    /// May `user` edit, renew or cancel `subscription`?
    async fn can_manage_subscription(
        &self,
        user: &UserId,
        subscription: &Subscription,
    ) -> Result<Permission, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_checker_is_object_safe() {
        fn _accepts_dyn(_checker: &dyn PermissionChecker) {}
    }

    #[test]
    fn only_granted_is_granted() {
        assert!(Permission::Granted.is_granted());
        assert!(!Permission::Denied("front desk only".into()).is_granted());
    }
}
