//! Steps shared by the subscription handlers.

use serde::Serialize;
use tracing::warn;

use crate::domain::foundation::{
    CommandMetadata, DomainError, DomainEvent, SerializableDomainEvent, SubscriptionId,
};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{EventPublisher, Permission, SubscriptionRepository};

/// Loads a subscription or fails with `NotFound`.
pub(super) async fn load(
    repository: &dyn SubscriptionRepository,
    id: SubscriptionId,
) -> Result<Subscription, SubscriptionError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or(SubscriptionError::NotFound(id))
}

/// Turns a permission decision into `PermissionDenied`.
///
/// A checker error is treated as a denial.
pub(super) fn require(
    decision: Result<Permission, DomainError>,
    action: &str,
    metadata: &CommandMetadata,
) -> Result<(), SubscriptionError> {
    match decision {
        Ok(Permission::Granted) => Ok(()),
        Ok(Permission::Denied(reason)) => {
            warn!(user_id = %metadata.user_id, action, %reason, "permission denied");
            Err(SubscriptionError::permission_denied(action))
        }
        Err(e) => {
            warn!(
                user_id = %metadata.user_id,
                action,
                error = %e,
                "permission check failed, denying"
            );
            Err(SubscriptionError::permission_denied(action))
        }
    }
}

/// Wraps, stamps and publishes one event.
pub(super) async fn publish<E>(
    publisher: &dyn EventPublisher,
    metadata: &CommandMetadata,
    event: &E,
) -> Result<(), SubscriptionError>
where
    E: DomainEvent + Serialize,
{
    let envelope = metadata.stamp(event.to_envelope()?);
    publisher.publish(envelope).await?;
    Ok(())
}
