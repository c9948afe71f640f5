//! Cover, read and download link derivation.
//!
//! These are pure string builders; nothing here touches the network.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Book;

/// Default cover image host
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";

/// Default archive host for reading and downloading
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive.org";

/// Cover image size token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl CoverSize {
    /// Token used in the cover URL
    pub fn token(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Link builder bound to a cover host and an archive host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    covers_url: String,
    archive_url: String,
}

impl Default for Links {
    fn default() -> Self {
        Self::new(DEFAULT_COVERS_URL, DEFAULT_ARCHIVE_URL)
    }
}

impl Links {
    /// Create a builder for the given hosts
    pub fn new(covers_url: &str, archive_url: &str) -> Self {
        Self {
            covers_url: covers_url.trim_end_matches('/').to_string(),
            archive_url: archive_url.trim_end_matches('/').to_string(),
        }
    }

    /// Cover image URL for a cover identifier
    pub fn cover(&self, cover_id: u64, size: CoverSize) -> String {
        format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_id, size.token())
    }

    /// Cover image URL for a book, if it has a cover
    pub fn book_cover(&self, book: &Book, size: CoverSize) -> Option<String> {
        book.cover_id.map(|id| self.cover(id, size))
    }

    /// Online reading URL from the book's first archive identifier
    pub fn read(&self, book: &Book) -> Option<String> {
        book.archive_ids
            .first()
            .map(|ia| format!("{}/details/{}", self.archive_url, ia))
    }

    /// Download URL from the book's first archive identifier
    pub fn download(&self, book: &Book) -> Option<String> {
        book.archive_ids
            .first()
            .map(|ia| format!("{}/download/{}", self.archive_url, ia))
    }
}

/// Cover image URL on the default host
pub fn cover_url(cover_id: u64, size: CoverSize) -> String {
    Links::default().cover(cover_id, size)
}

/// Online reading URL on the default host
pub fn read_url(book: &Book) -> Option<String> {
    Links::default().read(book)
}

/// Download URL on the default host
pub fn download_url(book: &Book) -> Option<String> {
    Links::default().download(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_url() {
        assert_eq!(
            cover_url(8231856, CoverSize::Medium),
            "https://covers.openlibrary.org/b/id/8231856-M.jpg"
        );
        assert_eq!(
            cover_url(8231856, CoverSize::Large),
            "https://covers.openlibrary.org/b/id/8231856-L.jpg"
        );
    }

    #[test]
    fn test_book_cover_missing() {
        let links = Links::default();
        let book = Book::new("/works/OL1W", "No Cover");
        assert_eq!(links.book_cover(&book, CoverSize::Small), None);

        let book = book.cover_id(42);
        assert_eq!(
            links.book_cover(&book, CoverSize::Small).as_deref(),
            Some("https://covers.openlibrary.org/b/id/42-S.jpg")
        );
    }

    #[test]
    fn test_read_and_download_urls() {
        let book =
            Book::new("/works/OL1W", "Walden").archive_ids(["waldenorlifeinwo00thor", "other"]);
        assert_eq!(
            read_url(&book).as_deref(),
            Some("https://archive.org/details/waldenorlifeinwo00thor")
        );
        assert_eq!(
            download_url(&book).as_deref(),
            Some("https://archive.org/download/waldenorlifeinwo00thor")
        );
    }

    #[test]
    fn test_no_archive_ids() {
        let book = Book::new("/works/OL1W", "Walden");
        assert_eq!(read_url(&book), None);
        assert_eq!(download_url(&book), None);
    }

    #[test]
    fn test_custom_hosts() {
        let links = Links::new("http://localhost:9000/", "http://mirror.test");
        let book = Book::new("/works/OL1W", "Walden").archive_ids(["walden"]);
        assert_eq!(links.cover(1, CoverSize::Large), "http://localhost:9000/b/id/1-L.jpg");
        assert_eq!(links.read(&book).as_deref(), Some("http://mirror.test/details/walden"));
    }
}
