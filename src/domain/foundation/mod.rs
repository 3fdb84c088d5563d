//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event plumbing that form
//! the vocabulary of the club subscription domain.

mod calendar_date;
mod command;
mod errors;
mod events;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use calendar_date::CalendarDate;
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{
    ClubId, CoachId, FreezeRequestId, MemberId, PaymentId, SubscriptionId, SubscriptionTypeId,
    UserId,
};
pub use money::{Money, MONEY_SCALE};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
