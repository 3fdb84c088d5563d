//! Subscription domain module.
//!
//! A subscription is a member's paid, time-bounded right to enter a club.
//! This module owns its lifecycle: sale, payments, freezes, renewal,
//! cancellation with refunds, and entry admission.
//!
//! # Module Structure
//!
//! - `aggregate` - Subscription aggregate entity
//! - `status` - Derived status and the rule that computes it
//! - `freeze` - Freeze requests and their validation
//! - `subscription_type` - Catalogue entries read by the engine
//! - `payment` - Payment requests and ledger records
//! - `refund` - Pluggable refund policies
//! - `entries` - Entry allowance
//! - `view` - Read model with derived fields resolved
//! - `events` - Domain events
//! - `errors` - Subscription-specific errors

mod aggregate;
mod entries;
mod errors;
mod events;
mod freeze;
mod payment;
mod refund;
mod status;
mod subscription_type;
mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{
    Cancellation, NewSubscription, RenewalOutcome, RenewalRequest, Subscription,
    SubscriptionUpdate,
};
pub use entries::EntryAllowance;
pub use errors::SubscriptionError;
pub use events::{
    EntryAdmitted, FreezeCancelled, FreezeRequested, PaymentApplied, SubscriptionCancelled,
    SubscriptionCreated, SubscriptionRenewed, SubscriptionUpdated,
};
pub use freeze::{FreezeRequest, FreezeRequestInput, FreezeState};
pub use payment::{PaymentMethod, PaymentRecord, PaymentRequest};
pub use refund::{NoRefund, ProRataRefund, RefundPolicy, RefundPolicyKind};
pub use status::{derive_status, status_from_parts, SubscriptionStatus};
pub use subscription_type::SubscriptionType;
pub use view::SubscriptionView;
