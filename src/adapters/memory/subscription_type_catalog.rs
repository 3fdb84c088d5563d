//! In-memory SubscriptionTypeCatalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionTypeId};
use crate::domain::subscription::SubscriptionType;
use crate::ports::SubscriptionTypeCatalog;

#[derive(Default)]
pub struct InMemorySubscriptionTypeCatalog {
    types: RwLock<HashMap<SubscriptionTypeId, SubscriptionType>>,
}

impl InMemorySubscriptionTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = SubscriptionType>) -> Self {
        let map = types.into_iter().map(|t| (t.id, t)).collect();
        Self {
            types: RwLock::new(map),
        }
    }

    /// Adds or replaces a type.
    pub fn insert(&self, sub_type: SubscriptionType) {
        self.types
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(sub_type.id, sub_type);
    }

    pub fn remove(&self, id: &SubscriptionTypeId) -> Option<SubscriptionType> {
        self.types
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(id)
    }
}

#[async_trait]
impl SubscriptionTypeCatalog for InMemorySubscriptionTypeCatalog {
    async fn find(&self, id: &SubscriptionTypeId) -> Result<Option<SubscriptionType>, DomainError> {
        let types = self.types.read().map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, "type catalogue lock poisoned")
        })?;
        Ok(types.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly() -> SubscriptionType {
        SubscriptionType::new(
            SubscriptionTypeId::new(),
            "Monthly",
            30,
            "500.00".parse().unwrap(),
            None,
            15,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn finds_inserted_type() {
        let sub_type = monthly();
        let catalog = InMemorySubscriptionTypeCatalog::with_types([sub_type.clone()]);
        assert_eq!(catalog.find(&sub_type.id).await.unwrap(), Some(sub_type));
    }

    #[tokio::test]
    async fn removed_type_is_gone() {
        let sub_type = monthly();
        let catalog = InMemorySubscriptionTypeCatalog::new();
        catalog.insert(sub_type.clone());
        catalog.remove(&sub_type.id);
        assert_eq!(catalog.find(&sub_type.id).await.unwrap(), None);
    }
}
