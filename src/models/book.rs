//! Book records as returned by the catalog search and work endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// Title carried by the placeholder record substituted when a detail lookup fails.
pub const DETAILS_UNAVAILABLE_TITLE: &str = "Details unavailable";

/// A catalog entry as returned by search.
///
/// Field names follow the catalog's search document layout so the record
/// can be deserialized straight from the `docs` array. Optional lists are
/// empty when the catalog omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Work key, e.g. `/works/OL45883W`. Unique within one result set.
    pub key: String,

    /// Book title
    #[serde(default)]
    pub title: String,

    /// Author names in catalog order
    #[serde(rename = "author_name", default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// Year of first publication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,

    /// Cover image identifier
    #[serde(rename = "cover_i", default, skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<u64>,

    /// Subject tags
    #[serde(rename = "subject", default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,

    /// Internet Archive identifiers. Non-empty means the book can be read online.
    #[serde(rename = "ia", default, skip_serializing_if = "Vec::is_empty")]
    pub archive_ids: Vec<String>,

    /// Whether the catalog reports a full text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_fulltext: Option<bool>,

    /// Number of editions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_count: Option<u32>,

    /// Language codes
    #[serde(rename = "language", default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    /// Publisher names
    #[serde(rename = "publisher", default, skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<String>,
}

impl Book {
    /// Create a record with only the required fields
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            authors: Vec::new(),
            first_publish_year: None,
            cover_id: None,
            subjects: Vec::new(),
            archive_ids: Vec::new(),
            has_fulltext: None,
            edition_count: None,
            languages: Vec::new(),
            publishers: Vec::new(),
        }
    }

    /// Set author names
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the first publish year
    pub fn first_publish_year(mut self, year: i32) -> Self {
        self.first_publish_year = Some(year);
        self
    }

    /// Set the cover identifier
    pub fn cover_id(mut self, cover_id: u64) -> Self {
        self.cover_id = Some(cover_id);
        self
    }

    /// Set subject tags
    pub fn subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Set archive identifiers
    pub fn archive_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archive_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Author names joined for display
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Whether the book can be read or downloaded from the archive
    pub fn is_readable(&self) -> bool {
        !self.archive_ids.is_empty()
    }
}

/// A work description, which the catalog sends either as a bare string or as
/// a typed object carrying the text in `value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed { value: String },
}

impl Description {
    /// Plain text of the description
    pub fn into_text(self) -> String {
        match self {
            Description::Text(text) => text,
            Description::Typed { value } => value,
        }
    }
}

/// Reference to an author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author key, e.g. `/authors/OL23919A`
    pub key: String,
}

/// Full work record fetched on demand for one selected book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    /// Work title
    #[serde(default)]
    pub title: String,

    /// Description normalized to plain text
    #[serde(
        default,
        deserialize_with = "deserialize_description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Cover image identifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covers: Vec<i64>,

    /// Author references
    #[serde(
        default,
        deserialize_with = "deserialize_authors",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authors: Vec<AuthorRef>,

    /// Subject tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,

    /// First publish date as free text (e.g. "1954", "July 29, 1954")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_date: Option<String>,
}

impl BookDetails {
    /// Placeholder substituted when the detail lookup fails.
    pub fn unavailable() -> Self {
        Self {
            title: DETAILS_UNAVAILABLE_TITLE.to_string(),
            description: None,
            covers: Vec::new(),
            authors: Vec::new(),
            subjects: Vec::new(),
            first_publish_date: None,
        }
    }

    /// First usable cover identifier. The catalog uses `-1` for removed covers.
    pub fn cover_id(&self) -> Option<u64> {
        self.covers
            .iter()
            .copied()
            .find(|id| *id > 0)
            .map(|id| id as u64)
    }
}

/// Where the detail lookup for the selected book stands.
///
/// A failed lookup is its own variant rather than a record with a magic
/// title, so a real work named like the placeholder is still `Loaded`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    /// Nothing selected
    #[default]
    Empty,
    /// Lookup in flight; any previous record is already dropped
    Loading,
    Loaded(BookDetails),
    /// Lookup failed
    Unavailable,
}

impl DetailState {
    /// The record to display: the fetched one, or the placeholder on failure
    pub fn record(&self) -> Option<BookDetails> {
        match self {
            DetailState::Loaded(details) => Some(details.clone()),
            DetailState::Unavailable => Some(BookDetails::unavailable()),
            DetailState::Empty | DetailState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DetailState::Loaded(_))
    }
}

fn deserialize_description<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Description>::deserialize(deserializer)?;
    Ok(raw.map(Description::into_text))
}

#[derive(Deserialize)]
struct AuthorEntry {
    author: Option<AuthorRef>,
}

fn deserialize_authors<'de, D>(deserializer: D) -> Result<Vec<AuthorRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<AuthorEntry>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| e.author)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_from_search_doc() {
        let doc = serde_json::json!({
            "key": "/works/OL82563W",
            "title": "Harry Potter and the Philosopher's Stone",
            "author_name": ["J. K. Rowling"],
            "first_publish_year": 1997,
            "cover_i": 10521270,
            "ia": ["harrypotterphilo0000rowl"],
            "has_fulltext": true,
            "edition_count": 367,
            "language": ["eng", "fre"]
        });

        let book: Book = serde_json::from_value(doc).unwrap();
        assert_eq!(book.key, "/works/OL82563W");
        assert_eq!(book.authors, vec!["J. K. Rowling"]);
        assert_eq!(book.first_publish_year, Some(1997));
        assert_eq!(book.cover_id, Some(10521270));
        assert!(book.is_readable());
        assert!(book.subjects.is_empty());
        assert!(book.publishers.is_empty());
    }

    #[test]
    fn test_book_minimal_doc() {
        let book: Book =
            serde_json::from_value(serde_json::json!({"key": "/works/OL1W", "title": "Untitled"}))
                .unwrap();
        assert_eq!(book, Book::new("/works/OL1W", "Untitled"));
        assert!(!book.is_readable());
    }

    #[test]
    fn test_description_plain_string() {
        let details: BookDetails = serde_json::from_value(serde_json::json!({
            "title": "Dune",
            "description": "A desert planet."
        }))
        .unwrap();
        assert_eq!(details.description.as_deref(), Some("A desert planet."));
    }

    #[test]
    fn test_description_typed_object() {
        let details: BookDetails = serde_json::from_value(serde_json::json!({
            "title": "Dune",
            "description": {"type": "/type/text", "value": "A desert planet."}
        }))
        .unwrap();
        assert_eq!(details.description.as_deref(), Some("A desert planet."));
    }

    #[test]
    fn test_details_authors_and_covers() {
        let details: BookDetails = serde_json::from_value(serde_json::json!({
            "title": "Dune",
            "covers": [-1, 11481354],
            "authors": [
                {"author": {"key": "/authors/OL79034A"}, "type": {"key": "/type/author_role"}},
                {"type": {"key": "/type/author_role"}}
            ],
            "subjects": ["Science fiction"],
            "first_publish_date": "1965"
        }))
        .unwrap();

        assert_eq!(details.cover_id(), Some(11481354));
        assert_eq!(
            details.authors,
            vec![AuthorRef {
                key: "/authors/OL79034A".to_string()
            }]
        );
        assert_eq!(details.first_publish_date.as_deref(), Some("1965"));
    }

    #[test]
    fn test_unavailable_placeholder() {
        let details = BookDetails::unavailable();
        assert_eq!(details.title, "Details unavailable");
        assert_eq!(details.cover_id(), None);
        assert_eq!(DetailState::Unavailable.record(), Some(details));
        assert!(!DetailState::Unavailable.is_loaded());
    }

    #[test]
    fn test_work_titled_like_placeholder_is_loaded() {
        let details: BookDetails =
            serde_json::from_value(serde_json::json!({"title": "Details unavailable"})).unwrap();
        let state = DetailState::Loaded(details.clone());
        assert!(state.is_loaded());
        assert_eq!(state.record(), Some(details));
    }

    #[test]
    fn test_empty_and_loading_have_no_record() {
        assert_eq!(DetailState::default(), DetailState::Empty);
        assert_eq!(DetailState::Empty.record(), None);
        assert!(DetailState::Loading.is_loading());
        assert_eq!(DetailState::Loading.record(), None);
    }
}
