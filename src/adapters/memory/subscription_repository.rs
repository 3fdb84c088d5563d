//! In-memory SubscriptionRepository.
//!
//! Keyed by subscription ID. `update` enforces the optimistic version check
//! the same way a SQL adapter would with `WHERE version = $expected`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SubscriptionId};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, bypassing version checks.
    pub fn with_subscriptions(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let map = subscriptions.into_iter().map(|s| (s.id, s)).collect();
        Self {
            subscriptions: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions
            .read()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "subscription store lock poisoned")
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut store = self.subscriptions.write().map_err(|_| lock_error())?;
        if store.contains_key(&subscription.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Subscription {} already exists", subscription.id),
            )
            .with_detail("subscription_id", subscription.id.to_string()));
        }
        store.insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update(
        &self,
        subscription: &Subscription,
        expected_version: u64,
    ) -> Result<(), DomainError> {
        let mut store = self.subscriptions.write().map_err(|_| lock_error())?;
        let stored = store.get_mut(&subscription.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription {} not found", subscription.id),
            )
            .with_detail("subscription_id", subscription.id.to_string())
        })?;
        if stored.version != expected_version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!(
                    "Subscription {} is at version {}, expected {}",
                    subscription.id, stored.version, expected_version
                ),
            )
            .with_detail("subscription_id", subscription.id.to_string()));
        }
        *stored = subscription.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let store = self.subscriptions.read().map_err(|_| lock_error())?;
        Ok(store.get(id).cloned())
    }

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Vec<Subscription>, DomainError> {
        let store = self.subscriptions.read().map_err(|_| lock_error())?;
        let mut found: Vec<Subscription> = store
            .values()
            .filter(|s| &s.member_id == member_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.created_at, s.start_date));
        Ok(found)
    }
}
