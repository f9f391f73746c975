//! Wikipedia image adapter - Implements ImageLookupPort using integration_maps

use std::sync::Arc;

use application::{error::ApplicationError, ports::ImageLookupPort};
use async_trait::async_trait;
use integration_maps::WikipediaClient;

use super::map_maps_error;

/// Thumbnail lookup backed by Wikipedia page summaries
#[derive(Debug, Clone)]
pub struct WikipediaImageAdapter {
    client: Arc<WikipediaClient>,
}

impl WikipediaImageAdapter {
    /// Wrap a Wikipedia client
    pub const fn new(client: Arc<WikipediaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageLookupPort for WikipediaImageAdapter {
    async fn thumbnail(&self, title: &str) -> Result<Option<String>, ApplicationError> {
        self.client.thumbnail(title).await.map_err(map_maps_error)
    }
}
