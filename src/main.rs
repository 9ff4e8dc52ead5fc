use clap::{Parser, Subcommand};
use dealflow::application::engine::DealEngine;
use dealflow::config::{ServerConfig, StorageConfig};
use dealflow::domain::ports::DealStoreBox;
use dealflow::infrastructure::in_memory::InMemoryDealStore;
use dealflow::interfaces::csv::deal_writer::DealWriter;
use dealflow::interfaces::http;
use miette::{IntoDiagnostic, Result};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the deal API over HTTP
    Serve(ServerConfig),
    /// Write a CSV report of every stored deal to stdout
    Export(StorageConfig),
}

fn open_store(config: &StorageConfig) -> Result<DealStoreBox> {
    match &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            let store = dealflow::infrastructure::rocksdb::RocksDBStore::open(db_path)
                .into_diagnostic()?;
            info!(path = %db_path.display(), "using RocksDB storage");
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryDealStore::new()))
        }
        None => Ok(Box::new(InMemoryDealStore::new())),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `export` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => {
            let engine = Arc::new(DealEngine::new(open_store(&config.storage)?));
            let app = http::router(engine);

            let listener = tokio::net::TcpListener::bind(config.bind)
                .await
                .into_diagnostic()?;
            info!("API listening on http://{}", config.bind);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .into_diagnostic()?;
        }
        Command::Export(config) => {
            let engine = DealEngine::new(open_store(&config)?);
            let deals = engine.all_deals().await.into_diagnostic()?;

            let stdout = io::stdout();
            let mut writer = DealWriter::new(stdout.lock());
            writer.write_deals(&deals).into_diagnostic()?;
        }
    }

    Ok(())
}
