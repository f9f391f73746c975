//! Image lookup port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for finding a representative image by title
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageLookupPort: Send + Sync {
    /// Image URL for `title`, or `None` when nothing matches
    async fn thumbnail(&self, title: &str) -> Result<Option<String>, ApplicationError>;
}
