//! Basic usage example for the Book Finder library.
//!
//! Searches Open Library by author, orders the results by year, then opens
//! the details view for the first book.

use book_finder::models::{SearchField, SortBy};
use book_finder::session::{BrowseSession, SearchOutcome};
use book_finder::OpenLibraryCatalog;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(OpenLibraryCatalog::new()?);
    let session = BrowseSession::new(catalog);

    match session.search_for("tolkien", SearchField::Author).await {
        SearchOutcome::Updated { count } => println!("Found {} books", count),
        SearchOutcome::Failed { error } => eprintln!("Search failed: {}", error),
        SearchOutcome::Skipped => return Ok(()),
    }

    session.set_sort(SortBy::Year);
    let visible = session.visible();

    for (i, book) in visible.iter().take(5).enumerate() {
        println!("\n{}. {}", i + 1, book.title);
        println!("   Authors: {}", book.author_line());
        if let Some(year) = book.first_publish_year {
            println!("   Year: {}", year);
        }
        if let Some(url) = session.links().read(book) {
            println!("   Read online: {}", url);
        }
    }

    if let Some(first) = visible.into_iter().next() {
        session.select(first).await;
        if let Some(view) = session.details_view() {
            println!("\n{}", view.title);
            if let Some(description) = view.description {
                println!("{}", description);
            }
        }
    }

    Ok(())
}
