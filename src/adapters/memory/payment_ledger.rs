//! In-memory PaymentLedger.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::domain::subscription::PaymentRecord;
use crate::ports::PaymentLedger;

/// Append-only list of payment records.
#[derive(Default)]
pub struct InMemoryPaymentLedger {
    records: RwLock<Vec<PaymentRecord>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<PaymentRecord> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn lock_error() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "payment ledger lock poisoned")
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn record(&self, payment: &PaymentRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_error())?;
        if records.iter().any(|r| r.id == payment.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Payment {} already recorded", payment.id),
            ));
        }
        records.push(payment.clone());
        Ok(())
    }

    async fn payments_for(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        let records = self.records.read().map_err(|_| lock_error())?;
        Ok(records
            .iter()
            .filter(|r| &r.subscription_id == subscription_id)
            .cloned()
            .collect())
    }
}
