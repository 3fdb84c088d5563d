//! Stub PermissionChecker for development and testing.
//!
//! Grants everything by default. A deny-list or a managers-only mode can be
//! switched on to exercise denial paths.
//!
//! # Usage
//!
//! ```ignore
//! let checker = StubPermissionChecker::new();
//! let checker = StubPermissionChecker::denying();
//! let checker = StubPermissionChecker::managers_only([manager_id]);
//! ```

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Subscription;
use crate::ports::{Permission, PermissionChecker};

#[derive(Debug, Clone, Default)]
pub struct StubPermissionChecker {
    deny_all: bool,
    /// When set, only these users may cancel freezes or manage subscriptions.
    managers: Option<HashSet<UserId>>,
}

impl StubPermissionChecker {
    /// Grants every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Denies every request.
    pub fn denying() -> Self {
        Self {
            deny_all: true,
            managers: None,
        }
    }

    /// Grants only the listed users.
    pub fn managers_only(managers: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            deny_all: false,
            managers: Some(managers.into_iter().collect()),
        }
    }

    fn decide(&self, user: &UserId) -> Permission {
        if self.deny_all {
            return Permission::Denied("all actions are disabled".to_string());
        }
        match &self.managers {
            Some(managers) if !managers.contains(user) => {
                Permission::Denied(format!("{} is not a club manager", user))
            }
            _ => Permission::Granted,
        }
    }
}

#[async_trait]
impl PermissionChecker for StubPermissionChecker {
    async fn can_cancel_freeze(
        &self,
        user: &UserId,
        _subscription: &Subscription,
    ) -> Result<Permission, DomainError> {
        Ok(self.decide(user))
    }

    async fn can_manage_subscription(
        &self,
        user: &UserId,
        _subscription: &Subscription,
    ) -> Result<Permission, DomainError> {
        Ok(self.decide(user))
    }
}
