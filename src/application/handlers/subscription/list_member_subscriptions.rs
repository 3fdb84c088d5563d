//! ListMemberSubscriptionsHandler - Query handler for a member's subscriptions.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::subscription::{SubscriptionError, SubscriptionStatus, SubscriptionView};
use crate::ports::{Clock, SubscriptionRepository};

#[derive(Debug, Clone)]
pub struct ListMemberSubscriptionsQuery {
    pub member_id: MemberId,
    /// Keep only subscriptions currently in this status.
    pub status: Option<SubscriptionStatus>,
}

pub struct ListMemberSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl ListMemberSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        query: ListMemberSubscriptionsQuery,
    ) -> Result<Vec<SubscriptionView>, SubscriptionError> {
        let today = self.clock.today();
        let subscriptions = self.repository.find_by_member(&query.member_id).await?;
        Ok(subscriptions
            .iter()
            .map(|s| SubscriptionView::of(s, today))
            .filter(|v| query.status.map_or(true, |status| v.status == status))
            .collect())
    }
}
