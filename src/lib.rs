//! # foli
//!
//! Pulls one project from the Behance v2 API, keeps it as a record in an
//! embedded store, saves its cover image to disk, and serves the stored
//! records over HTTP.
//!
//! ## Flow
//!
//! At startup the [`pipeline`] walks three dependent upstream calls
//! (creatives to follow → that creative's projects → the first project's
//! detail), maps the detail into a [`Record`](types::Record), starts the cover
//! download as a detached task and saves the record. The [`api`] then serves:
//!
//! - `GET /` - every record, in insertion order
//! - `POST /q` - for each query object in a JSON array, the first record whose
//!   non-empty fields all match exactly (or a zero-valued record)
//!
//! ## Quick Start
//!
//! ```no_run
//! use foli::{Config, Database, Fetcher, ImageDownloader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::from_env()?);
//!     let db = Arc::new(Database::new(&config.persistence.database_path).await?);
//!
//!     let fetcher = Fetcher::new(&config.upstream)?;
//!     let images = ImageDownloader::new(&config.images)?;
//!     foli::pipeline::ingest(&fetcher, &db, &images).await?;
//!
//!     foli::api::start_api_server(db, config).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Upstream resource fetcher
pub mod fetcher;
/// Cover image downloads
pub mod images;
/// Project to record mapping
pub mod mapper;
/// Startup ingestion pipeline
pub mod pipeline;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{ApiError, DataError, DatabaseError, Error, ErrorDetail, Result, ToHttpStatus};
pub use fetcher::Fetcher;
pub use images::ImageDownloader;
pub use types::{NewRecord, Record, RecordId, RecordQuery};

/// Wait for a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Wait for a termination signal (Ctrl+C).
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
