//! # Book Finder
//!
//! Search the Open Library catalog, browse curated subject panels and inspect
//! book details.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Book, BookDetails, SearchQuery, etc.)
//! - [`catalog`]: The `Catalog` trait with Open Library and mock implementations
//! - [`session`]: Browsing state: results, loading flags, selection and details
//! - [`utils`]: HTTP client, ordering, filtering and link derivation
//! - [`ui`]: Terminal rendering
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, MockCatalog, OpenLibraryCatalog};
pub use models::{Book, BookDetails, SearchField, SearchQuery, SortBy};
pub use session::{BrowseSession, DetailView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
