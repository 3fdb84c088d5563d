//! Typed payment requests and the line items handed to the payment ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CalendarDate, Money, PaymentId, SubscriptionId, Timestamp};

/// How the member paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "label")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    /// Club-specific method (voucher, corporate account, ...).
    Other(String),
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::Other(label) => write!(f, "other:{}", label),
        }
    }
}

/// A payment as entered at the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Money,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: Money, method: PaymentMethod) -> Self {
        Self {
            amount,
            method,
            transaction_id: None,
            notes: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A validated payment, ready for the external ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub subscription_id: SubscriptionId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub paid_on: CalendarDate,
    pub recorded_at: Timestamp,
}

impl PaymentRecord {
    pub fn from_request(
        subscription_id: SubscriptionId,
        request: PaymentRequest,
        paid_on: CalendarDate,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            subscription_id,
            amount: request.amount,
            method: request.method,
            transaction_id: request.transaction_id,
            notes: request.notes,
            paid_on,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let request = PaymentRequest::new("100.00".parse().unwrap(), PaymentMethod::Card)
            .with_transaction_id("txn-42")
            .with_notes("second installment");
        assert_eq!(request.transaction_id.as_deref(), Some("txn-42"));
        assert_eq!(request.notes.as_deref(), Some("second installment"));
    }

    #[test]
    fn record_copies_request_fields() {
        let sub = SubscriptionId::new();
        let request = PaymentRequest::new("25.50".parse().unwrap(), PaymentMethod::Cash);
        let record = PaymentRecord::from_request(
            sub,
            request.clone(),
            "2024-01-15".parse().unwrap(),
            Timestamp::now(),
        );
        assert_eq!(record.subscription_id, sub);
        assert_eq!(record.amount, request.amount);
        assert_eq!(record.method, PaymentMethod::Cash);
    }

    #[test]
    fn method_serializes_tagged() {
        let json = serde_json::to_string(&PaymentMethod::Other("voucher".into())).unwrap();
        assert_eq!(json, r#"{"kind":"other","label":"voucher"}"#);
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, r#"{"kind":"bank_transfer"}"#);
    }
}
