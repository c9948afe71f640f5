//! Mock catalog for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{Book, BookDetails, SearchQuery, SearchResponse};

/// A catalog that serves predefined records.
///
/// Searches for terms without a configured response return no books.
/// Detail lookups for keys without a configured record fail with
/// [`CatalogError::NotFound`]. Per-request delays let tests force
/// responses to resolve out of order.
#[derive(Debug, Default)]
pub struct MockCatalog {
    search_responses: Mutex<HashMap<String, Vec<Book>>>,
    details: Mutex<HashMap<String, BookDetails>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: Mutex<bool>,
    requests: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCatalog {
    /// Create an empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these books for an exact search term.
    pub fn set_search_response(&self, term: &str, books: Vec<Book>) {
        lock(&self.search_responses).insert(term.to_string(), books);
    }

    /// Serve this record for a work key.
    pub fn set_details(&self, key: &str, details: BookDetails) {
        lock(&self.details).insert(key.to_string(), details);
    }

    /// Delay the response to a search term or work key.
    pub fn set_delay(&self, term_or_key: &str, delay: Duration) {
        lock(&self.delays).insert(term_or_key.to_string(), delay);
    }

    /// Make every request fail with a network error.
    pub fn set_failing(&self, failing: bool) {
        *lock(&self.failing) = failing;
    }

    /// Search terms and work keys requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    async fn begin(&self, request: &str) -> Result<(), CatalogError> {
        lock(&self.requests).push(request.to_string());
        let delay = lock(&self.delays).get(request).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *lock(&self.failing) {
            return Err(CatalogError::Network("mock catalog unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Catalog"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError> {
        self.begin(&query.term).await?;
        let books = lock(&self.search_responses)
            .get(&query.term)
            .cloned()
            .unwrap_or_default();
        let books: Vec<Book> = books.into_iter().take(query.limit).collect();
        let total = books.len();
        Ok(SearchResponse::new(books, &query.term).total_results(total))
    }

    async fn get_details(&self, key: &str) -> Result<BookDetails, CatalogError> {
        self.begin(key).await?;
        lock(&self.details)
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }
}

/// Helper to create a book record for testing.
pub fn make_book(key: &str, title: &str) -> Book {
    Book::new(format!("/works/{}", key), title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search_and_limit() {
        let catalog = MockCatalog::new();
        catalog.set_search_response(
            "title:rust",
            vec![
                make_book("OL1W", "Rust in Action"),
                make_book("OL2W", "Programming Rust"),
                make_book("OL3W", "The Rust Book"),
            ],
        );

        let response = catalog
            .search(&SearchQuery::new("title:rust").limit(2))
            .await
            .unwrap();
        assert_eq!(response.books.len(), 2);

        let response = catalog
            .search(&SearchQuery::new("title:go"))
            .await
            .unwrap();
        assert!(response.books.is_empty());
        assert_eq!(catalog.requests(), vec!["title:rust", "title:go"]);
    }

    #[tokio::test]
    async fn test_mock_details_and_failure() {
        let catalog = MockCatalog::new();
        catalog.set_details("/works/OL1W", BookDetails::unavailable());

        assert!(catalog.get_details("/works/OL1W").await.is_ok());
        assert!(matches!(
            catalog.get_details("/works/OL9W").await,
            Err(CatalogError::NotFound(_))
        ));

        catalog.set_failing(true);
        assert!(matches!(
            catalog.get_details("/works/OL1W").await,
            Err(CatalogError::Network(_))
        ));
    }
}
