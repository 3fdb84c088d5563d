//! Subscription-specific error types.
//!
//! Every rejected operation comes back as one of these values so the calling
//! layer can show a localized message keyed on [`SubscriptionError::code`].
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound, FreezeNotFound | 404 |
//! | InvalidAmount, InvalidDays, InvalidStartDate, InvalidDateRange, ValidationFailed | 400 |
//! | UnknownType | 400 |
//! | ExceedsRemaining, ExceedsMaxFreeze | 422 |
//! | AlreadyFrozen, AlreadyCancelled, SubscriptionNotActive, FreezeNotActive, NotActive, NoEntriesRemaining | 409 |
//! | PermissionDenied | 403 |
//! | Conflict | 409 |
//! | DataIntegrity, Infrastructure | 500 |

use crate::domain::foundation::{
    DomainError, ErrorCode, FreezeRequestId, Money, SubscriptionId, SubscriptionTypeId,
};

use super::SubscriptionStatus;

/// Subscription lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Payment or price amount is zero/negative where a positive value is required.
    InvalidAmount { amount: Money, reason: String },

    /// Payment is larger than the outstanding balance.
    ExceedsRemaining { amount: Money, remaining: Money },

    /// Freeze length is not a positive number of days.
    InvalidDays(i64),

    /// Freeze start date is missing or in the past.
    InvalidStartDate { reason: String },

    /// Freeze length is above the subscription type's cap.
    ExceedsMaxFreeze { requested: i64, max: u32 },

    /// An active freeze request already exists.
    AlreadyFrozen(FreezeRequestId),

    /// Freezing requires an Active subscription.
    SubscriptionNotActive(SubscriptionStatus),

    /// The freeze request has already been cancelled or has elapsed.
    FreezeNotActive(FreezeRequestId),

    /// The caller may not perform this action.
    PermissionDenied { action: String },

    /// Subscription type is not in the catalogue (or no longer sold).
    UnknownType(SubscriptionTypeId),

    /// Entry admission requires an Active subscription.
    NotActive(SubscriptionStatus),

    /// The entry allowance is used up.
    NoEntriesRemaining { max_entries: u32 },

    /// Stored data is inconsistent (e.g., dangling type reference).
    DataIntegrity(String),

    /// Subscription was not found.
    NotFound(SubscriptionId),

    /// Freeze request was not found on the subscription.
    FreezeNotFound(FreezeRequestId),

    /// Subscription is already cancelled.
    AlreadyCancelled(SubscriptionId),

    /// Start date falls after end date.
    InvalidDateRange { start: String, end: String },

    /// Generic field validation failure.
    ValidationFailed { field: String, message: String },

    /// Another writer updated the subscription first.
    Conflict(SubscriptionId),

    /// Infrastructure error.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn invalid_amount(amount: Money, reason: impl Into<String>) -> Self {
        SubscriptionError::InvalidAmount {
            amount,
            reason: reason.into(),
        }
    }

    pub fn exceeds_remaining(amount: Money, remaining: Money) -> Self {
        SubscriptionError::ExceedsRemaining { amount, remaining }
    }

    pub fn invalid_start_date(reason: impl Into<String>) -> Self {
        SubscriptionError::InvalidStartDate {
            reason: reason.into(),
        }
    }

    pub fn permission_denied(action: impl Into<String>) -> Self {
        SubscriptionError::PermissionDenied {
            action: action.into(),
        }
    }

    pub fn data_integrity(message: impl Into<String>) -> Self {
        SubscriptionError::DataIntegrity(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            SubscriptionError::ExceedsRemaining { .. } => ErrorCode::ExceedsRemaining,
            SubscriptionError::InvalidDays(_) => ErrorCode::InvalidDays,
            SubscriptionError::InvalidStartDate { .. } => ErrorCode::InvalidStartDate,
            SubscriptionError::ExceedsMaxFreeze { .. } => ErrorCode::ExceedsMaxFreeze,
            SubscriptionError::AlreadyFrozen(_) => ErrorCode::AlreadyFrozen,
            SubscriptionError::SubscriptionNotActive(_) => ErrorCode::SubscriptionNotActive,
            SubscriptionError::FreezeNotActive(_) => ErrorCode::FreezeNotActive,
            SubscriptionError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            SubscriptionError::UnknownType(_) => ErrorCode::UnknownSubscriptionType,
            SubscriptionError::NotActive(_) => ErrorCode::SubscriptionNotActive,
            SubscriptionError::NoEntriesRemaining { .. } => ErrorCode::NoEntriesRemaining,
            SubscriptionError::DataIntegrity(_) => ErrorCode::DataIntegrity,
            SubscriptionError::NotFound(_) => ErrorCode::SubscriptionNotFound,
            SubscriptionError::FreezeNotFound(_) => ErrorCode::FreezeRequestNotFound,
            SubscriptionError::AlreadyCancelled(_) => ErrorCode::AlreadyCancelled,
            SubscriptionError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Conflict(_) => ErrorCode::Conflict,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::InvalidAmount { amount, reason } => {
                format!("Invalid amount {}: {}", amount, reason)
            }
            SubscriptionError::ExceedsRemaining { amount, remaining } => format!(
                "Payment of {} exceeds the remaining balance of {}",
                amount, remaining
            ),
            SubscriptionError::InvalidDays(days) => {
                format!("Freeze length must be a positive number of days, got {}", days)
            }
            SubscriptionError::InvalidStartDate { reason } => {
                format!("Invalid freeze start date: {}", reason)
            }
            SubscriptionError::ExceedsMaxFreeze { requested, max } => format!(
                "Requested {} freeze days but this subscription type allows at most {}",
                requested, max
            ),
            SubscriptionError::AlreadyFrozen(id) => {
                format!("Subscription already has an active freeze request ({})", id)
            }
            SubscriptionError::SubscriptionNotActive(status) => {
                format!("Only active subscriptions can be frozen (status: {})", status)
            }
            SubscriptionError::FreezeNotActive(id) => {
                format!("Freeze request {} is not active", id)
            }
            SubscriptionError::PermissionDenied { action } => {
                format!("You do not have permission to {}", action)
            }
            SubscriptionError::UnknownType(id) => format!("Unknown subscription type: {}", id),
            SubscriptionError::NotActive(status) => {
                format!("Subscription is not active (status: {})", status)
            }
            SubscriptionError::NoEntriesRemaining { max_entries } => {
                format!("All {} entries of this subscription have been used", max_entries)
            }
            SubscriptionError::DataIntegrity(msg) => format!("Data integrity error: {}", msg),
            SubscriptionError::NotFound(id) => format!("Subscription not found: {}", id),
            SubscriptionError::FreezeNotFound(id) => format!("Freeze request not found: {}", id),
            SubscriptionError::AlreadyCancelled(id) => {
                format!("Subscription {} is already cancelled", id)
            }
            SubscriptionError::InvalidDateRange { start, end } => {
                format!("Start date {} is after end date {}", start, end)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Conflict(id) => {
                format!("Subscription {} was modified concurrently; reload and retry", id)
            }
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller may re-read state and try again.
    ///
    /// Business-rule rejections are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubscriptionError::Infrastructure(_) | SubscriptionError::Conflict(_)
        )
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::PermissionDenied => SubscriptionError::PermissionDenied {
                action: err.message,
            },
            ErrorCode::DataIntegrity => SubscriptionError::DataIntegrity(err.message),
            ErrorCode::Conflict | ErrorCode::SubscriptionNotFound => {
                let id = err
                    .details
                    .get("subscription_id")
                    .and_then(|raw| raw.parse::<SubscriptionId>().ok());
                match (err.code, id) {
                    (ErrorCode::Conflict, Some(id)) => SubscriptionError::Conflict(id),
                    (ErrorCode::SubscriptionNotFound, Some(id)) => SubscriptionError::NotFound(id),
                    _ => SubscriptionError::Infrastructure(err.to_string()),
                }
            }
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
