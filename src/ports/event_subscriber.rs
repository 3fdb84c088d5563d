//! EventSubscriber port - Registering interest in subscription events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Handlers must be idempotent: delivery is at-least-once.
///
/// # Example
///
/// ```ignore
/// struct RefundNotifier { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for RefundNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let cancelled: SubscriptionCancelled = event
///             .payload_as()
///             .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
///         // Notify billing of cancelled.refund_amount...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "RefundNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logs.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events by `event_type`.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}

/// An event bus both publishes and subscribes.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
