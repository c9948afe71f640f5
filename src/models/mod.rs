//! Core data models for catalog records and search operations.

mod book;
mod search;

pub use book::{AuthorRef, Book, BookDetails, Description, DetailState, DETAILS_UNAVAILABLE_TITLE};
pub use search::{
    BookFilter, QuerySelection, SearchField, SearchQuery, SearchResponse, SortBy, FULL_FIELDS,
    PANEL_FIELDS,
};
