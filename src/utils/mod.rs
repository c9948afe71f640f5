//! Utility modules supporting catalog browsing.
//!
//! - [`HttpClient`]: shared HTTP client with timeouts and a crate user agent
//! - [`order_books`]: stable client-side ordering by relevance, year or title
//! - [`filter_books`]: derived category/collection filtering
//! - [`Links`]: cover, read and download URL derivation
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for terminal output
//!
//! # Ordering and filtering
//!
//! ```rust
//! use book_finder::models::{Book, BookFilter, SortBy};
//! use book_finder::utils::{filter_books, order_books};
//!
//! let books = vec![
//!     Book::new("/works/OL1W", "Zebra").subjects(["Zoology"]),
//!     Book::new("/works/OL2W", "apple").subjects(["Botany"]),
//! ];
//! let ordered = order_books(&books, SortBy::Title);
//! assert_eq!(ordered[0].title, "apple");
//!
//! let visible = filter_books(&ordered, &BookFilter::none().category("zoo"));
//! assert_eq!(visible.len(), 1);
//! ```

mod display;
mod filter;
mod http;
pub mod links;
mod ordering;

pub use display::{
    book_table_columns, format_year, terminal_width, truncate_at_word, truncate_with_ellipsis,
};
pub use filter::{filter_books, matches_filter};
pub use http::{HttpClient, DEFAULT_TIMEOUT, USER_AGENT};
pub use links::{CoverSize, Links};
pub use ordering::{compare_titles, order_books};
