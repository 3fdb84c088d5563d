//! GetSubscriptionHandler - Query handler for a single subscription view.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{SubscriptionError, SubscriptionView};
use crate::ports::{Clock, SubscriptionRepository};

use super::support;

#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub subscription_id: SubscriptionId,
}

/// Returns a subscription with status and balances derived for today.
pub struct GetSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl GetSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<SubscriptionView, SubscriptionError> {
        let subscription = support::load(self.repository.as_ref(), query.subscription_id).await?;
        Ok(SubscriptionView::of(&subscription, self.clock.today()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::test_support::{money, Harness};
    use crate::domain::subscription::SubscriptionStatus;

    #[tokio::test]
    async fn view_is_derived_for_clock_day() {
        let h = Harness::new("2024-01-15");
        let sub = h.seed("2024-01-01", "2024-01-31", "150.00").await;
        let handler = GetSubscriptionHandler::new(h.repository.clone(), h.clock.clone());

        let view = handler
            .handle(GetSubscriptionQuery {
                subscription_id: sub.id,
            })
            .await
            .unwrap();
        assert_eq!(view.status, SubscriptionStatus::Active);
        assert_eq!(view.remaining_amount, money("350.00"));

        h.clock.advance_days(30);
        let later = handler
            .handle(GetSubscriptionQuery {
                subscription_id: sub.id,
            })
            .await
            .unwrap();
        assert_eq!(later.status, SubscriptionStatus::Expired);
    }

    #[tokio::test]
    async fn missing_subscription_is_not_found() {
        let h = Harness::new("2024-01-15");
        let handler = GetSubscriptionHandler::new(h.repository.clone(), h.clock.clone());
        let id = SubscriptionId::new();

        let err = handler
            .handle(GetSubscriptionQuery {
                subscription_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SubscriptionError::NotFound(id));
    }
}
