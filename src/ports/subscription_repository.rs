//! Subscription repository port (write side).
//!
//! Persists and loads Subscription aggregates, freeze requests included.
//!
//! # Design
//!
//! - **Optimistic locking**: `update` carries the version the caller loaded;
//!   a mismatch is a `Conflict`, never a silent overwrite
//! - **No status column**: status is derived on read, so nothing here
//!   filters by it

use crate::domain::foundation::{DomainError, MemberId, SubscriptionId};
use crate::domain::subscription::Subscription;
use async_trait::async_trait;

/// Repository port for Subscription aggregate persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a subscription with the same ID exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Replace a stored subscription.
    ///
    /// `expected_version` is the version the caller loaded before mutating.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    /// - `Conflict` if the stored version differs from `expected_version`
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        subscription: &Subscription,
        expected_version: u64,
    ) -> Result<(), DomainError>;

    /// Find a subscription by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// All subscriptions of a member, oldest first.
    async fn find_by_member(&self, member_id: &MemberId) -> Result<Vec<Subscription>, DomainError>;
}
