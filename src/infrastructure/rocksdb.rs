use crate::domain::deal::Deal;
use crate::domain::ports::{DealQuery, DealStore};
use crate::error::{DealError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Column Family for storing deal documents.
pub const CF_DEALS: &str = "deals";

/// A persistent deal store using RocksDB.
///
/// Each deal is one JSON document keyed by its UUID bytes in the `deals`
/// Column Family. Writes are serialized through `write_lock` so the version
/// read and the put in `compare_and_swap` happen as one step.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `deals` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_deals = ColumnFamilyDescriptor::new(CF_DEALS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_deals])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_DEALS).ok_or_else(|| {
            DealError::InternalError(Box::new(std::io::Error::other(
                "Deals column family not found",
            )))
        })
    }

    fn read(&self, id: Uuid) -> Result<Option<Deal>> {
        let cf = self.cf()?;
        match self.db.get_pinned_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, deal: &Deal) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(deal).map_err(|e| {
            DealError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, deal.id.as_bytes(), value)?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<Deal>> {
        let cf = self.cf()?;
        let mut deals = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            deals.push(decode(&value)?);
        }
        Ok(deals)
    }
}

fn decode(bytes: &[u8]) -> Result<Deal> {
    serde_json::from_slice(bytes).map_err(|e| {
        DealError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl DealStore for RocksDBStore {
    async fn insert(&self, deal: Deal) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.read(deal.id)?.is_some() {
            return Err(DealError::ConcurrentModification(deal.id));
        }
        self.write(&deal)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Deal>> {
        self.read(id)
    }

    async fn compare_and_swap(&self, deal: Deal, expected_version: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let current = self.read(deal.id)?.ok_or(DealError::NotFound(deal.id))?;
        if current.version != expected_version {
            return Err(DealError::ConcurrentModification(deal.id));
        }
        self.write(&deal)
    }

    async fn list(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        let mut deals: Vec<Deal> = self
            .scan()?
            .into_iter()
            .filter(|deal| query.matches(deal))
            .collect();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deals)
    }

    async fn all_deals(&self) -> Result<Vec<Deal>> {
        let mut deals = self.scan()?;
        deals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(deals)
    }
}
