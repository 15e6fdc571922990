use foli::{Config, Database, Error, Fetcher, ImageDownloader, Result, pipeline};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foli=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(Error::Config { message, .. }) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let db = match Database::new(&config.persistence.database_path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(
                path = %config.persistence.database_path.display(),
                error = %e,
                "Failed to open record store"
            );
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        path = %config.persistence.database_path.display(),
        "Record store opened"
    );

    // Records from earlier runs are still served after a failed ingest
    if let Err(e) = ingest(&config, &db).await {
        tracing::error!(error = %e, "Startup ingest failed, serving existing records");
    }

    let result = foli::api::start_api_server(db.clone(), config).await;
    db.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "API server failed");
            ExitCode::FAILURE
        }
    }
}

async fn ingest(config: &Config, db: &Database) -> Result<()> {
    let fetcher = Fetcher::new(&config.upstream)?;
    let images = ImageDownloader::new(&config.images)?;

    // Dropping the handle leaves the download running detached
    let ingested = pipeline::ingest(&fetcher, db, &images).await?;
    tracing::info!(id = %ingested.id, "Startup ingest complete");

    Ok(())
}
