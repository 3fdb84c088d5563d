//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the subscription engine and the outside world. Adapters implement them.
//!
//! ## Persistence
//!
//! - `SubscriptionRepository` - Subscription aggregates, version-checked
//! - `SubscriptionTypeCatalog` - Read-only subscription types
//! - `PaymentLedger` - Payment line items
//!
//! ## Collaborators
//!
//! - `PermissionChecker` - Staff permission decisions
//! - `AttendanceRecorder` - Stores admitted visits
//! - `Clock` - Business day and audit instant
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod attendance_recorder;
mod clock;
mod event_publisher;
mod event_subscriber;
mod payment_ledger;
mod permission_checker;
mod subscription_repository;
mod subscription_type_catalog;

pub use attendance_recorder::AttendanceRecorder;
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use payment_ledger::PaymentLedger;
pub use permission_checker::{Permission, PermissionChecker};
pub use subscription_repository::SubscriptionRepository;
pub use subscription_type_catalog::SubscriptionTypeCatalog;
