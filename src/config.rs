//! Runtime configuration: command-line flags with environment fallbacks.

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3001";

/// Where deals are persisted.
#[derive(Args, Debug, Clone, Default)]
pub struct StorageConfig {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "DEALFLOW_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP API listens on.
    #[arg(long, env = "DEALFLOW_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub storage: StorageConfig,
}
