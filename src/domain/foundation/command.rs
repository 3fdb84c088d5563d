//! Context carried by every command handler call.
//!
//! Handlers take a `CommandMetadata` next to their command instead of loose
//! `user_id` / `correlation_id` arguments, and copy it onto the events they
//! publish.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, UserId};

/// Who is acting and under which request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Staff user executing the command. Used for permission checks.
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from ("front_desk", "turnstile", "import").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if none was supplied.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Copies correlation and user onto an outgoing event.
    pub fn stamp(&self, envelope: EventEnvelope) -> EventEnvelope {
        envelope
            .with_correlation_id(self.correlation_id())
            .with_user_id(self.user_id.as_str())
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Front-desk fixture with a fixed correlation ID.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("desk-1").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
