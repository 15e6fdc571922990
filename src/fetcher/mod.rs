//! Resource fetcher for the Behance v2 API
//!
//! Three dependent GET calls, each parameterised by the previous one:
//!
//! 1. `/creativestofollow` → first creative's `username`
//! 2. `/users/{username}/projects` → first project's `id`
//! 3. `/projects/{id}` → the [`ProjectDetail`] that gets mapped into a record
//!
//! Every call carries `page` and `client_id` query parameters and is attempted
//! exactly once. A failed call is logged and degrades to the zero-valued
//! payload; the first-element accessors then turn an empty list into
//! [`DataError::EmptyUpstreamList`], which stops the remaining stages.

use crate::config::UpstreamConfig;
use crate::error::{DataError, Error, Result};
use crate::types::{
    Creative, CreativesPage, ProjectDetail, ProjectEnvelope, ProjectRef, ProjectsPage,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// HTTP client for the three upstream stages
#[derive(Clone, Debug)]
pub struct Fetcher {
    http_client: reqwest::Client,
    base_url: String,
    client_id: String,
    page: u32,
}

impl Fetcher {
    /// Create a fetcher from upstream settings
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            page: config.page,
        })
    }

    /// Single GET against `url` with the page and client id appended, decoded as `T`
    ///
    /// The status code is not inspected: whatever body comes back is decoded,
    /// and a body that does not fit `T` is a decode error.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, page = self.page, "fetching upstream resource");

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("page", self.page.to_string()),
                ("client_id", self.client_id.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "upstream returned non-success status");
        }

        Ok(response.json::<T>().await?)
    }

    /// Like [`fetch`](Self::fetch), but a failure is logged and yields `T::default()`
    pub async fn fetch_or_default<T: DeserializeOwned + Default>(&self, url: &str) -> T {
        match self.fetch(url).await {
            Ok(value) => value,
            Err(e) => {
                warn!(url = %url, error = %e, "upstream call failed, continuing with empty data");
                T::default()
            }
        }
    }

    /// Stage 1: creatives suggested to follow
    pub async fn creatives_to_follow(&self) -> CreativesPage {
        let url = format!("{}/creativestofollow", self.base_url);
        self.fetch_or_default(&url).await
    }

    /// Stage 2: projects of a user
    pub async fn user_projects(&self, username: &str) -> ProjectsPage {
        let url = format!(
            "{}/users/{}/projects",
            self.base_url,
            urlencoding::encode(username)
        );
        self.fetch_or_default(&url).await
    }

    /// Stage 3: a single project's details
    pub async fn project(&self, id: i64) -> ProjectDetail {
        let url = format!("{}/projects/{}", self.base_url, id);
        self.fetch_or_default::<ProjectEnvelope>(&url).await.project
    }

    /// Run all three stages and return the first project of the first creative
    pub async fn fetch_project_detail(&self) -> Result<ProjectDetail> {
        let creatives = self.creatives_to_follow().await;
        let creative = first_creative(&creatives)?;
        debug!(username = %creative.username, "selected creative");

        let projects = self.user_projects(&creative.username).await;
        let project = first_project(&projects)?;
        debug!(project_id = project.id, "selected project");

        let detail = self.project(project.id).await;
        info!(
            username = %creative.username,
            project_id = project.id,
            title = %detail.title,
            "fetched project detail"
        );

        Ok(detail)
    }
}

/// First creative of the listing, or an error if the listing is empty
pub fn first_creative(page: &CreativesPage) -> Result<&Creative> {
    page.creatives_to_follow.first().ok_or_else(|| {
        DataError::EmptyUpstreamList {
            list: "creatives_to_follow".to_string(),
        }
        .into()
    })
}

/// First project of the listing, or an error if the listing is empty
pub fn first_project(page: &ProjectsPage) -> Result<&ProjectRef> {
    page.projects.first().ok_or_else(|| {
        DataError::EmptyUpstreamList {
            list: "projects".to_string(),
        }
        .into()
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
