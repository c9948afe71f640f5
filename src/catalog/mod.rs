//! Bibliographic catalog backends.
//!
//! The [`Catalog`] trait is the seam between the browsing session and the
//! network. [`OpenLibraryCatalog`] talks to the public Open Library API;
//! [`MockCatalog`] serves canned records for tests and demos.

pub mod mock;
mod openlibrary;

pub use mock::MockCatalog;
pub use openlibrary::OpenLibraryCatalog;

use crate::models::{BookDetails, SearchQuery, SearchResponse};
use async_trait::async_trait;

/// A remote catalog that can be searched and asked for work details.
#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    /// Short identifier (e.g. "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Run one search request
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError>;

    /// Fetch the detail record for a work key such as `/works/OL45883W`
    async fn get_details(&self, key: &str) -> Result<BookDetails, CatalogError>;
}

/// Errors that can occur when talking to a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Catalog answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(format!("JSON: {}", err))
    }
}
