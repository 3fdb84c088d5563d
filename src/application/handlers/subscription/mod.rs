//! Subscription command and query handlers.
//!
//! Every command handler follows the same shape: load the aggregate, check
//! permissions where the action needs them, run the domain method, persist
//! with the loaded version, then publish one event.

mod admit_entry;
mod apply_payment;
mod cancel_freeze;
mod cancel_subscription;
mod create_subscription;
mod get_subscription;
mod list_member_subscriptions;
mod renew_subscription;
mod request_freeze;
mod state;
mod support;
mod update_subscription;

#[cfg(test)]
pub(crate) mod test_support;

pub use admit_entry::{AdmitEntryCommand, AdmitEntryHandler, AdmitEntryResult};
pub use apply_payment::{ApplyPaymentCommand, ApplyPaymentHandler, ApplyPaymentResult};
pub use cancel_freeze::{CancelFreezeCommand, CancelFreezeHandler, CancelFreezeResult};
pub use cancel_subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use list_member_subscriptions::{ListMemberSubscriptionsHandler, ListMemberSubscriptionsQuery};
pub use renew_subscription::{
    RenewSubscriptionCommand, RenewSubscriptionHandler, RenewSubscriptionResult,
};
pub use request_freeze::{RequestFreezeCommand, RequestFreezeHandler, RequestFreezeResult};
pub use state::{SubscriptionAppState, SubscriptionPorts};
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};
