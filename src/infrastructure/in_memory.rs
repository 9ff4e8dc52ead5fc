use crate::domain::deal::Deal;
use crate::domain::ports::{DealQuery, DealStore};
use crate::error::{DealError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for deals.
///
/// Uses `Arc<RwLock<HashMap<Uuid, Deal>>>` to allow shared concurrent access.
/// The version check in `compare_and_swap` runs under the write lock, which
/// makes it atomic with respect to every other writer.
#[derive(Default, Clone)]
pub struct InMemoryDealStore {
    deals: Arc<RwLock<HashMap<Uuid, Deal>>>,
}

impl InMemoryDealStore {
    /// Creates a new, empty in-memory deal store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DealStore for InMemoryDealStore {
    async fn insert(&self, deal: Deal) -> Result<()> {
        let mut deals = self.deals.write().await;
        if deals.contains_key(&deal.id) {
            return Err(DealError::ConcurrentModification(deal.id));
        }
        deals.insert(deal.id, deal);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Deal>> {
        let deals = self.deals.read().await;
        Ok(deals.get(&id).cloned())
    }

    async fn compare_and_swap(&self, deal: Deal, expected_version: u64) -> Result<()> {
        let mut deals = self.deals.write().await;
        let current = deals.get(&deal.id).ok_or(DealError::NotFound(deal.id))?;
        if current.version != expected_version {
            return Err(DealError::ConcurrentModification(deal.id));
        }
        deals.insert(deal.id, deal);
        Ok(())
    }

    async fn list(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        let deals = self.deals.read().await;
        let mut matching: Vec<Deal> = deals
            .values()
            .filter(|deal| query.matches(deal))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn all_deals(&self) -> Result<Vec<Deal>> {
        let deals = self.deals.read().await;
        let mut all: Vec<Deal> = deals.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}
