use crate::domain::deal::DealStatus;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DealError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Cannot {action} a deal that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: DealStatus,
    },
    #[error("Deal {0} not found")]
    NotFound(Uuid),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Deal {0} was modified concurrently, reload and retry")]
    ConcurrentModification(Uuid),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDBError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl DealError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DealError>;
