//! Storage adapters implementing the `DealStore` port.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
