//! Payment ledger port.
//!
//! Receives one line item per accepted payment. The ledger is external
//! bookkeeping; the subscription's `paid_amount` stays the source of truth
//! for the remaining balance.

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::PaymentRecord;
use async_trait::async_trait;

#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Append a payment line item.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a record with the same ID was already written
    /// - `DatabaseError` on persistence failure
    async fn record(&self, payment: &PaymentRecord) -> Result<(), DomainError>;

    /// Line items for one subscription, in recording order.
    async fn payments_for(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Vec<PaymentRecord>, DomainError>;
}
