//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory repository, catalogue, ledger and attendance
//! - `events` - In-process event bus
//! - `permissions` - Stub permission checker
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod events;
pub mod memory;
pub mod permissions;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::{
    InMemoryAttendanceRecorder, InMemoryPaymentLedger, InMemorySubscriptionRepository,
    InMemorySubscriptionTypeCatalog, Visit,
};
pub use permissions::StubPermissionChecker;
