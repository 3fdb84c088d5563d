//! State machine trait for stored lifecycle states.
//!
//! Only states that are persisted use this trait. Subscription status is
//! derived from dates on every read and never transitions explicitly.

use super::ValidationError;

/// Trait for state enums with an explicit transition table.
///
/// Implementors list the allowed edges; `transition_to` and `is_terminal`
/// come for free.
///
/// ```ignore
/// let next = freeze.state.transition_to(FreezeState::Cancelled)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
