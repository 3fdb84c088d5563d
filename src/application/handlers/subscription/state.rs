//! Shared wiring for the subscription handlers.

use std::sync::Arc;

use crate::config::LifecycleConfig;
use crate::domain::subscription::RefundPolicy;
use crate::ports::{
    AttendanceRecorder, Clock, EventPublisher, PaymentLedger, PermissionChecker,
    SubscriptionRepository, SubscriptionTypeCatalog,
};

use super::{
    AdmitEntryHandler, ApplyPaymentHandler, CancelFreezeHandler, CancelSubscriptionHandler,
    CreateSubscriptionHandler, GetSubscriptionHandler, ListMemberSubscriptionsHandler,
    RenewSubscriptionHandler, RequestFreezeHandler, UpdateSubscriptionHandler,
};

/// Ports and policies shared by every subscription handler.
///
/// Cheap to clone; handlers are built on demand from it.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub repository: Arc<dyn SubscriptionRepository>,
    pub catalog: Arc<dyn SubscriptionTypeCatalog>,
    pub ledger: Arc<dyn PaymentLedger>,
    pub attendance: Arc<dyn AttendanceRecorder>,
    pub permissions: Arc<dyn PermissionChecker>,
    pub refund_policy: Arc<dyn RefundPolicy>,
    pub clock: Arc<dyn Clock>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub default_max_freeze_days: u32,
}

/// Port implementations supplied by the embedding application.
pub struct SubscriptionPorts {
    pub repository: Arc<dyn SubscriptionRepository>,
    pub catalog: Arc<dyn SubscriptionTypeCatalog>,
    pub ledger: Arc<dyn PaymentLedger>,
    pub attendance: Arc<dyn AttendanceRecorder>,
    pub permissions: Arc<dyn PermissionChecker>,
    pub clock: Arc<dyn Clock>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl SubscriptionAppState {
    /// Combines the ports with the configured refund policy and freeze cap.
    pub fn from_config(ports: SubscriptionPorts, config: &LifecycleConfig) -> Self {
        Self {
            repository: ports.repository,
            catalog: ports.catalog,
            ledger: ports.ledger,
            attendance: ports.attendance,
            permissions: ports.permissions,
            refund_policy: config.refund_policy(),
            clock: ports.clock,
            event_publisher: ports.event_publisher,
            default_max_freeze_days: config.default_max_freeze_days,
        }
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(
            self.repository.clone(),
            self.catalog.clone(),
            self.ledger.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn apply_payment_handler(&self) -> ApplyPaymentHandler {
        ApplyPaymentHandler::new(
            self.repository.clone(),
            self.ledger.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn request_freeze_handler(&self) -> RequestFreezeHandler {
        RequestFreezeHandler::new(
            self.repository.clone(),
            self.catalog.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
            self.default_max_freeze_days,
        )
    }

    pub fn cancel_freeze_handler(&self) -> CancelFreezeHandler {
        CancelFreezeHandler::new(
            self.repository.clone(),
            self.permissions.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn renew_subscription_handler(&self) -> RenewSubscriptionHandler {
        RenewSubscriptionHandler::new(
            self.repository.clone(),
            self.catalog.clone(),
            self.ledger.clone(),
            self.permissions.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(
            self.repository.clone(),
            self.permissions.clone(),
            self.refund_policy.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn update_subscription_handler(&self) -> UpdateSubscriptionHandler {
        UpdateSubscriptionHandler::new(
            self.repository.clone(),
            self.permissions.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn admit_entry_handler(&self) -> AdmitEntryHandler {
        AdmitEntryHandler::new(
            self.repository.clone(),
            self.attendance.clone(),
            self.clock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.repository.clone(), self.clock.clone())
    }

    pub fn list_member_subscriptions_handler(&self) -> ListMemberSubscriptionsHandler {
        ListMemberSubscriptionsHandler::new(self.repository.clone(), self.clock.clone())
    }
}
