//! The details view shown for a selected book.

use serde::Serialize;

use crate::models::{Book, BookDetails, DetailState};
use crate::utils::{CoverSize, Links};

const MAX_LANGUAGES: usize = 3;
const MAX_PUBLISHERS: usize = 2;
const MAX_SUBJECTS: usize = 10;

/// Summary fields of the selected book merged with its detail record.
///
/// Title, cover and links always come from the summary, so the view stays
/// useful when the detail lookup failed or is still pending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub key: String,
    pub title: String,
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub cover_url: Option<String>,
    pub edition_count: Option<u32>,
    pub languages: Vec<String>,
    pub publishers: Vec<String>,
    pub subjects: Vec<String>,
    pub read_url: Option<String>,
    pub download_url: Option<String>,
    pub description: Option<String>,
    pub first_publish_date: Option<String>,
    /// Title reported by the detail record, or the placeholder title on failure
    pub details_title: Option<String>,
    pub details_available: bool,
    pub loading: bool,
}

impl DetailView {
    /// Compose the view for `book` with the current state of its detail lookup.
    pub fn compose(book: &Book, state: &DetailState, links: &Links) -> Self {
        let record = state.record();
        let details = record.as_ref();

        let cover_url = links.book_cover(book, CoverSize::Large).or_else(|| {
            details
                .and_then(BookDetails::cover_id)
                .map(|id| links.cover(id, CoverSize::Large))
        });

        let subjects = if book.subjects.is_empty() {
            details.map(|d| d.subjects.clone()).unwrap_or_default()
        } else {
            book.subjects.clone()
        };

        Self {
            key: book.key.clone(),
            title: book.title.clone(),
            authors: book.authors.clone(),
            first_publish_year: book.first_publish_year,
            cover_url,
            edition_count: book.edition_count,
            languages: book.languages.iter().take(MAX_LANGUAGES).cloned().collect(),
            publishers: book.publishers.iter().take(MAX_PUBLISHERS).cloned().collect(),
            subjects: subjects.into_iter().take(MAX_SUBJECTS).collect(),
            read_url: links.read(book),
            download_url: links.download(book),
            description: details.and_then(|d| d.description.clone()),
            first_publish_date: details.and_then(|d| d.first_publish_date.clone()),
            details_title: details.map(|d| d.title.clone()),
            details_available: state.is_loaded(),
            loading: state.is_loading(),
        }
    }
}
