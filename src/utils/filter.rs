//! Derived category and collection filtering.

use crate::models::{Book, BookFilter};

fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Whether a book passes the filter.
///
/// Category matches any subject containing the text; collection matches the
/// title. Both are case-insensitive and combine with AND. Empty strings
/// count as unset.
pub fn matches_filter(book: &Book, filter: &BookFilter) -> bool {
    if let Some(category) = active(&filter.category) {
        let in_subjects = book
            .subjects
            .iter()
            .any(|s| s.to_lowercase().contains(&category));
        if !in_subjects {
            return false;
        }
    }

    if let Some(collection) = active(&filter.collection) {
        if !book.title.to_lowercase().contains(&collection) {
            return false;
        }
    }

    true
}

/// Return the books that pass the filter, in their existing order.
pub fn filter_books(books: &[Book], filter: &BookFilter) -> Vec<Book> {
    books
        .iter()
        .filter(|b| matches_filter(b, filter))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Book> {
        vec![
            Book::new("/works/OL1W", "Calculus Classics").subjects(["Mathematics", "Algebra"]),
            Book::new("/works/OL2W", "Feynman Lectures").subjects(["Physics"]),
            Book::new("/works/OL3W", "Untagged Classics"),
        ]
    }

    #[test]
    fn test_category_substring_match() {
        let books = sample();
        let filter = BookFilter::none().category("math");
        assert!(matches_filter(&books[0], &filter));
        assert!(!matches_filter(&books[1], &filter));
    }

    #[test]
    fn test_category_excludes_missing_subjects() {
        let books = sample();
        let filter = BookFilter::none().category("classics");
        assert!(!matches_filter(&books[2], &filter));
    }

    #[test]
    fn test_collection_matches_title() {
        let filtered = filter_books(&sample(), &BookFilter::none().collection("CLASSICS"));
        let keys: Vec<&str> = filtered.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["/works/OL1W", "/works/OL3W"]);
    }

    #[test]
    fn test_both_filters_and() {
        let filter = BookFilter::none().category("algebra").collection("classics");
        let filtered = filter_books(&sample(), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].key, "/works/OL1W");
    }

    #[test]
    fn test_no_filter_passes_everything() {
        assert_eq!(filter_books(&sample(), &BookFilter::none()), sample());

        let empty = BookFilter {
            category: Some(String::new()),
            collection: Some(String::new()),
        };
        assert_eq!(filter_books(&sample(), &empty), sample());
    }
}
