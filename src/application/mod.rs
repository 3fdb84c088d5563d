//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Commands
    AdmitEntryCommand, AdmitEntryHandler, AdmitEntryResult,
    ApplyPaymentCommand, ApplyPaymentHandler, ApplyPaymentResult,
    CancelFreezeCommand, CancelFreezeHandler, CancelFreezeResult,
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
    RenewSubscriptionCommand, RenewSubscriptionHandler, RenewSubscriptionResult,
    RequestFreezeCommand, RequestFreezeHandler, RequestFreezeResult,
    UpdateSubscriptionCommand, UpdateSubscriptionHandler,
    // Queries
    GetSubscriptionHandler, GetSubscriptionQuery,
    ListMemberSubscriptionsHandler, ListMemberSubscriptionsQuery,
    // Wiring
    SubscriptionAppState, SubscriptionPorts,
};
