//! Wikipedia page-summary client
//!
//! Looks up the lead image of an article through the REST
//! `page/summary/{title}` endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::WikipediaConfig;
use crate::error::MapsError;

/// Wikipedia thumbnail lookup
#[derive(Debug)]
pub struct WikipediaClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl WikipediaClient {
    /// Create a new Wikipedia client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &WikipediaConfig) -> Result<Self, MapsError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| MapsError::ConfigurationMissing(format!("wikipedia.base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(MapsError::ConfigurationMissing(
                "wikipedia.base_url cannot be a base URL".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout_secs: config.timeout_secs,
        })
    }

    fn summary_url(&self, title: &str) -> Url {
        let slug = title.trim().replace(' ', "_");
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["page", "summary", slug.as_str()]);
        }
        url
    }

    /// Thumbnail URL of the article titled `title`
    ///
    /// A missing article or an article without an image is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-404 error statuses or
    /// unparseable bodies.
    #[instrument(skip(self))]
    pub async fn thumbnail(&self, title: &str) -> Result<Option<String>, MapsError> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.summary_url(title))
            .send()
            .await
            .map_err(|e| MapsError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%title, "No Wikipedia article");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MapsError::RequestFailed(format!("HTTP {status}")));
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        Ok(summary
            .thumbnail
            .map(|t| t.source)
            .filter(|s| !s.is_empty()))
    }
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}
