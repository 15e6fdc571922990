//! Startup ingestion: fetch a project, map it, save it, download its cover

use crate::db::Database;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::images::ImageDownloader;
use crate::mapper::map_record;
use crate::types::{NewRecord, RecordId};
use tokio::task::JoinHandle;
use tracing::info;

/// Outcome of a successful [`ingest`]
#[derive(Debug)]
pub struct Ingested {
    /// Id the store assigned to the saved record
    pub id: RecordId,
    /// The record as it was saved
    pub record: NewRecord,
    /// The detached image download
    pub download: JoinHandle<()>,
}

/// Run the fetch → map → save pipeline once
///
/// The cover download is started before the save and is never awaited here;
/// whether it succeeds has no bearing on the returned result. Any fetch,
/// mapping or store error stops the pipeline at that stage.
pub async fn ingest(
    fetcher: &Fetcher,
    db: &Database,
    images: &ImageDownloader,
) -> Result<Ingested> {
    let detail = fetcher.fetch_project_detail().await?;
    let record = map_record(&detail)?;

    let download = images.spawn(record.source_url.clone());

    let id = db.save_record(&record).await?;
    info!(
        id = %id,
        title = %record.title,
        filename = %record.filename,
        "record saved"
    );

    Ok(Ingested {
        id,
        record,
        download,
    })
}
