//! Client-side ordering of search results.

use std::cmp::{Ordering, Reverse};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Book, SortBy};

/// Return a copy of `books` ordered by `sort`.
///
/// The input is never reordered in place. Both sorts are stable, so books
/// with equal keys keep their catalog order.
pub fn order_books(books: &[Book], sort: SortBy) -> Vec<Book> {
    let mut ordered = books.to_vec();
    match sort {
        SortBy::Relevance => {}
        SortBy::Year => ordered.sort_by_key(|b| Reverse(b.first_publish_year.unwrap_or(0))),
        SortBy::Title => ordered.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    ordered
}

/// Title comparison that ignores case and accents.
///
/// Titles are compared on their base letters first (`Émile` sorts with
/// `Emile`, before `Zola`). Titles equal on base letters fall back to a
/// case-insensitive comparison with accents, so `Emile` precedes `Émile`.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
}

fn collation_key(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(title: &str) -> impl Iterator<Item = char> + '_ {
    title.chars().flat_map(char::to_lowercase)
}
