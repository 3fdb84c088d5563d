//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier with the usual constructors and
/// `Display`/`FromStr` impls.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a member subscription.
    SubscriptionId
);

uuid_identifier!(
    /// Unique identifier for a freeze request on a subscription.
    FreezeRequestId
);

uuid_identifier!(
    /// Unique identifier for a recorded payment line item.
    PaymentId
);

uuid_identifier!(
    /// Reference to a club member (owned by the member directory).
    MemberId
);

uuid_identifier!(
    /// Reference to a club (owned by the club directory).
    ClubId
);

uuid_identifier!(
    /// Reference to a subscription type in the catalogue.
    SubscriptionTypeId
);

uuid_identifier!(
    /// Reference to a coach assigned to a subscription.
    CoachId
);

/// Identifier of the staff user performing an operation.
///
/// Opaque string issued by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_generates_unique_values() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn subscription_id_parses_from_valid_string() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let id: SubscriptionId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn freeze_request_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<FreezeRequestId>().is_err());
    }

    #[test]
    fn type_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(SubscriptionTypeId::from_uuid(uuid).as_uuid(), &uuid);
    }

    #[test]
    fn member_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&MemberId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn user_id_rejects_blank_string() {
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_displays_inner_value() {
        let id = UserId::new("front-desk-7").unwrap();
        assert_eq!(id.to_string(), "front-desk-7");
        assert_eq!(id.as_str(), "front-desk-7");
    }
}
