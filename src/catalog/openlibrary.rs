//! Open Library catalog implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::catalog::{Catalog, CatalogError};
use crate::config::CatalogConfig;
use crate::models::{Book, BookDetails, SearchQuery, SearchResponse};
use crate::utils::HttpClient;

/// Open Library catalog
///
/// Uses the `search.json` endpoint for searches and `<key>.json` for work details.
#[derive(Debug, Clone)]
pub struct OpenLibraryCatalog {
    client: HttpClient,
    search_url: String,
    base_url: String,
}

impl OpenLibraryCatalog {
    /// Create a catalog pointing at the public Open Library endpoints
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_config(&CatalogConfig::default())
    }

    /// Create a catalog from configuration
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_endpoints(
            client,
            &config.search_url,
            &config.base_url,
        ))
    }

    /// Create a catalog with an existing client and explicit endpoints
    pub fn with_endpoints(client: HttpClient, search_url: &str, base_url: &str) -> Self {
        Self {
            client,
            search_url: search_url.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the search request URL
    pub fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}?q={}&limit={}&fields={}",
            self.search_url,
            urlencoding::encode(&query.term),
            query.limit,
            query.fields_param()
        )
    }

    /// Build the detail request URL for a work key
    pub fn details_url(&self, key: &str) -> String {
        if key.starts_with('/') {
            format!("{}{}.json", self.base_url, key)
        } else {
            format!("{}/{}.json", self.base_url, key)
        }
    }
}

#[async_trait]
impl Catalog for OpenLibraryCatalog {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError> {
        let url = self.search_url(query);
        tracing::debug!("Searching Open Library: {}", url);

        let response = self
            .client
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to search Open Library: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::Api(format!(
                "Open Library search returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to read response: {}", e)))?;
        let data: SearchDocs = serde_json::from_str(&body)?;

        tracing::debug!("Open Library returned {} books for {}", data.docs.len(), query.term);

        let mut response = SearchResponse::new(data.docs, &query.term);
        if let Some(total) = data.num_found {
            response = response.total_results(total);
        }
        Ok(response)
    }

    async fn get_details(&self, key: &str) -> Result<BookDetails, CatalogError> {
        if key.trim().is_empty() {
            return Err(CatalogError::InvalidRequest("empty work key".to_string()));
        }

        let url = self.details_url(key);
        tracing::debug!("Fetching details: {}", url);

        let response = self
            .client
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to fetch details: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Api(format!("HTTP error! status: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to read response: {}", e)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct SearchDocs {
    #[serde(default)]
    docs: Vec<Book>,
    #[serde(rename = "numFound", default)]
    num_found: Option<usize>,
}
