//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Book;

/// Field projection for user searches.
pub const FULL_FIELDS: &[&str] = &[
    "key",
    "title",
    "author_name",
    "first_publish_year",
    "cover_i",
    "subject",
    "ia",
    "has_fulltext",
    "edition_count",
    "language",
    "publisher",
];

/// Field projection for the curated panels.
pub const PANEL_FIELDS: &[&str] = &[
    "key",
    "title",
    "author_name",
    "first_publish_year",
    "cover_i",
    "subject",
    "ia",
    "has_fulltext",
];

/// Which catalog field a free-text query is scoped to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Subject,
}

impl SearchField {
    /// Qualifier prefixed to the query text
    pub fn qualifier(&self) -> &'static str {
        match self {
            SearchField::Title => "title:",
            SearchField::Author => "author:",
            SearchField::Subject => "subject:",
        }
    }

    /// Parse a selector name. Anything unrecognized scopes to the title.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "author" => SearchField::Author,
            "subject" => SearchField::Subject,
            _ => SearchField::Title,
        }
    }

    /// Build the qualified search term, or `None` when the text is blank.
    pub fn qualify(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.qualifier(), trimmed))
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Subject => "subject",
        };
        f.write_str(name)
    }
}

/// Ordering applied to a result list after it is fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep the catalog's order
    #[default]
    Relevance,
    /// Newest first publication first, unknown years last
    Year,
    /// Case-insensitive alphabetical
    Title,
}

/// Derived filter over an ordered result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Keep books with a subject containing this text (case-insensitive)
    pub category: Option<String>,

    /// Keep books whose title contains this text (case-insensitive)
    pub collection: Option<String>,
}

impl BookFilter {
    /// Filter that lets everything through
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the category filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the collection filter
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Whether any filter is set
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.collection.is_some()
    }
}

/// Query controls held by a browsing session.
///
/// Changing the sort or filter never triggers a new request; only the text
/// and field feed the next search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySelection {
    /// Free-text query as typed
    pub text: String,

    /// Field the text is scoped to
    pub field: SearchField,

    /// Ordering of the visible results
    pub sort: SortBy,

    /// Category and collection filters
    pub filter: BookFilter,
}

/// One outbound search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Qualified search term, e.g. `author:tolkien`
    pub term: String,

    /// Maximum number of results to return
    pub limit: usize,

    /// Fields the catalog should project into each result
    pub fields: Vec<String>,
}

impl SearchQuery {
    /// Create a query for an already-qualified term with the full projection
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            limit: 20,
            fields: FULL_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Build a user query from raw text. Returns `None` for blank text.
    pub fn from_text(text: &str, field: SearchField) -> Option<Self> {
        field.qualify(text).map(Self::new)
    }

    /// Set maximum results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replace the field projection
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Projection as the comma-separated list the catalog expects
    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }
}

/// Search response containing books and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Books found, in catalog order
    pub books: Vec<Book>,

    /// Total number of matches reported by the catalog
    pub total_results: Option<usize>,

    /// Term that was executed
    pub query: String,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(books: Vec<Book>, query: impl Into<String>) -> Self {
        Self {
            books,
            total_results: None,
            query: query.into(),
        }
    }

    /// Set total results
    pub fn total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_each_field() {
        assert_eq!(
            SearchField::Title.qualify("  The Hobbit "),
            Some("title:The Hobbit".to_string())
        );
        assert_eq!(
            SearchField::Author.qualify("tolkien"),
            Some("author:tolkien".to_string())
        );
        assert_eq!(
            SearchField::Subject.qualify("computer science"),
            Some("subject:computer science".to_string())
        );
    }

    #[test]
    fn test_qualify_blank_text() {
        assert_eq!(SearchField::Title.qualify(""), None);
        assert_eq!(SearchField::Author.qualify("   \t\n"), None);
        assert!(SearchQuery::from_text("  ", SearchField::Subject).is_none());
    }

    #[test]
    fn test_unrecognized_selector_defaults_to_title() {
        assert_eq!(SearchField::from_selector("author"), SearchField::Author);
        assert_eq!(SearchField::from_selector("Subject"), SearchField::Subject);
        assert_eq!(SearchField::from_selector("isbn"), SearchField::Title);
        assert_eq!(SearchField::from_selector(""), SearchField::Title);
    }

    #[test]
    fn test_search_query_defaults() {
        let query = SearchQuery::from_text("dune", SearchField::Title).unwrap();
        assert_eq!(query.term, "title:dune");
        assert_eq!(query.limit, 20);
        assert_eq!(
            query.fields_param(),
            "key,title,author_name,first_publish_year,cover_i,subject,ia,has_fulltext,edition_count,language,publisher"
        );
    }

    #[test]
    fn test_panel_projection() {
        let query = SearchQuery::new("subject:mathematics")
            .limit(4)
            .fields(PANEL_FIELDS);
        assert_eq!(query.limit, 4);
        assert_eq!(
            query.fields_param(),
            "key,title,author_name,first_publish_year,cover_i,subject,ia,has_fulltext"
        );
    }

    #[test]
    fn test_filter_is_active() {
        assert!(!BookFilter::none().is_active());
        assert!(BookFilter::none().category("math").is_active());
        assert!(BookFilter::none().collection("classics").is_active());
    }
}
