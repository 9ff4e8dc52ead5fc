use super::deal::{Deal, DealStatus};
use super::lifecycle::Party;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Which deals a listing should return.
#[derive(Debug, Clone, PartialEq)]
pub struct DealQuery {
    pub party: Party,
    pub user_id: String,
    pub status: Option<DealStatus>,
}

impl DealQuery {
    pub fn matches(&self, deal: &Deal) -> bool {
        deal.involves(self.party, &self.user_id)
            && self.status.is_none_or(|status| deal.status == status)
    }
}

#[async_trait]
pub trait DealStore: Send + Sync {
    /// Stores a freshly requested deal.
    async fn insert(&self, deal: Deal) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Deal>>;
    /// Replaces the stored deal only if its version is still `expected_version`.
    ///
    /// Fails with `ConcurrentModification` when another writer got there first
    /// and with `NotFound` when the deal does not exist.
    async fn compare_and_swap(&self, deal: Deal, expected_version: u64) -> Result<()>;
    /// Deals matching `query`, newest first.
    async fn list(&self, query: &DealQuery) -> Result<Vec<Deal>>;
    /// Every stored deal, oldest first.
    async fn all_deals(&self) -> Result<Vec<Deal>>;
}

pub type DealStoreBox = Box<dyn DealStore>;
