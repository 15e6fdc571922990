//! Cover image downloads
//!
//! Images are written to `<image_dir>/<filename>` where the filename is the
//! last path segment of the source URL. Downloads run as detached tasks: only
//! connection establishment is bounded, the body read is not, and failures
//! are logged without reaching any caller.

use crate::config::ImageConfig;
use crate::error::{Error, Result};
use crate::mapper::derive_filename;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Downloads source images into a local directory
#[derive(Clone, Debug)]
pub struct ImageDownloader {
    http_client: reqwest::Client,
    image_dir: PathBuf,
}

impl ImageDownloader {
    /// Create a downloader from image settings
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            image_dir: config.image_dir.clone(),
        })
    }

    /// Directory images are written to
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Download `src` and write its body to the image directory, overwriting
    /// any existing file of the same name
    ///
    /// The response status is not checked; whatever body the server sends is
    /// written.
    pub async fn download(&self, src: &str) -> Result<PathBuf> {
        let filename = derive_filename(src)?;

        let response = self.http_client.get(src).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(url = %src, status = status.as_u16(), "image host returned non-success status");
        }

        let body = response.bytes().await?;

        tokio::fs::create_dir_all(&self.image_dir).await?;
        let dest = self.image_dir.join(&filename);
        tokio::fs::write(&dest, &body).await?;

        info!(url = %src, path = %dest.display(), bytes = body.len(), "image saved");
        Ok(dest)
    }

    /// Start [`download`](Self::download) as a detached task
    ///
    /// Nothing awaits the handle in normal operation; it is returned for tests.
    pub fn spawn(&self, src: impl Into<String>) -> JoinHandle<()> {
        let downloader = self.clone();
        let src = src.into();

        tokio::spawn(async move {
            if let Err(e) = downloader.download(&src).await {
                warn!(url = %src, error = %e, "image download failed");
            }
        })
    }
}
