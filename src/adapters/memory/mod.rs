//! In-memory persistence adapters.
//!
//! Backed by `RwLock`ed collections. Suitable for tests and single-process
//! embedding; nothing survives a restart.

mod attendance_recorder;
mod payment_ledger;
mod subscription_repository;
mod subscription_type_catalog;

pub use attendance_recorder::{InMemoryAttendanceRecorder, Visit};
pub use payment_ledger::InMemoryPaymentLedger;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use subscription_type_catalog::InMemorySubscriptionTypeCatalog;
