//! Read-only access to the subscription type catalogue.

use crate::domain::foundation::{DomainError, SubscriptionTypeId};
use crate::domain::subscription::SubscriptionType;
use async_trait::async_trait;

/// Port for looking up subscription types.
///
/// Retired types are still returned; callers decide whether they may be used.
#[async_trait]
pub trait SubscriptionTypeCatalog: Send + Sync {
    /// Returns `None` if the catalogue has no such type.
    async fn find(&self, id: &SubscriptionTypeId) -> Result<Option<SubscriptionType>, DomainError>;
}
