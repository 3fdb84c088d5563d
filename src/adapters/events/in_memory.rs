//! In-memory event bus.
//!
//! Synchronous, in-process delivery. Used by tests and by embedders that run
//! the engine without a message broker.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-memory event bus.
///
/// Every published envelope is kept for inspection. Handlers run inline, in
/// subscription order; a failing handler does not stop the others.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("subscription.freeze_requested.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    /// Every envelope published so far, in order.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());

        // Clone handlers so no lock is held across an await.
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            handlers.get(&event.event_type).cloned().unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                warn!(
                    handler = handler.name(),
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    error = %e,
                    "event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        EventId, FreezeRequestId, SerializableDomainEvent, SubscriptionId, Timestamp,
    };
    use crate::domain::subscription::FreezeRequested;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::new(ErrorCode::InternalError, "boom"));
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    fn envelope(subscription_id: SubscriptionId) -> EventEnvelope {
        FreezeRequested {
            event_id: EventId::new(),
            subscription_id,
            freeze_request_id: FreezeRequestId::new(),
            requested_days: 5,
            start_date: "2024-01-16".parse().unwrap(),
            requested_at: Timestamp::now(),
        }
        .to_envelope()
        .unwrap()
    }

    #[tokio::test]
    async fn publish_records_event() {
        let bus = InMemoryEventBus::new();
        let id = SubscriptionId::new();
        bus.publish(envelope(id)).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("subscription.freeze_requested.v1"));
        assert_eq!(bus.events_for_aggregate(&id.to_string()).len(), 1);
    }

    #[tokio::test]
    async fn subscribed_handler_is_invoked() {
        let bus = InMemoryEventBus::new();
        let handler = CountingHandler::new(false);
        bus.subscribe("subscription.freeze_requested.v1", handler.clone());

        bus.publish(envelope(SubscriptionId::new())).await.unwrap();

        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_handler_reports_error_but_others_run() {
        let bus = InMemoryEventBus::new();
        let failing = CountingHandler::new(true);
        let healthy = CountingHandler::new(false);
        bus.subscribe_all(&["subscription.freeze_requested.v1"], failing.clone());
        bus.subscribe("subscription.freeze_requested.v1", healthy.clone());

        let result = bus.publish(envelope(SubscriptionId::new())).await;

        assert!(result.is_err());
        assert_eq!(healthy.calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn clear_empties_log() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope(SubscriptionId::new())).await.unwrap();
        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
