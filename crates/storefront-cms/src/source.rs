//! The content source seam.

use async_trait::async_trait;

use crate::models::{Category, CategorySummary};

/// Errors raised while reading from the content source.
///
/// Every variant is fatal to a build: there is no retry and no partial
/// output.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("Invalid content source endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Content source query failed: {0}")]
    UpstreamQueryFailure(String),

    #[error("Category not found: {slug}")]
    CategoryNotFound { slug: String },

    #[error("Malformed content source response: {0}")]
    MalformedResponse(String),
}

/// A read-only provider of catalog content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List every category (`PageCategories`).
    async fn categories(&self) -> Result<Vec<CategorySummary>, CmsError>;

    /// Fetch one category and its products by slug (`PageCategory`).
    ///
    /// Fails with [`CmsError::CategoryNotFound`] when nothing matches.
    async fn category(&self, slug: &str) -> Result<Category, CmsError>;
}
