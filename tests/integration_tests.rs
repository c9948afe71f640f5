//! Integration tests for Book Finder
//!
//! These tests drive a full browsing session against a local mock HTTP server
//! and against the in-memory mock catalog.

use book_finder::catalog::mock::make_book;
use book_finder::config::Config;
use book_finder::models::{BookDetails, DetailState, SearchField, SortBy};
use book_finder::session::{BrowseSession, DetailOutcome, PanelsOutcome, SearchOutcome};
use book_finder::{Catalog, MockCatalog, OpenLibraryCatalog};
use mockito::Matcher;
use std::sync::Arc;

/// Configuration pointing every endpoint at the mock server
fn config_for(server: &mockito::Server) -> Config {
    let mut config = Config::default();
    config.catalog.search_url = format!("{}/search.json", server.url());
    config.catalog.base_url = server.url();
    config.catalog.timeout_secs = 5;
    config
}

fn session_for(server: &mockito::Server) -> BrowseSession {
    let config = config_for(server);
    config.validate().unwrap();
    let catalog = Arc::new(OpenLibraryCatalog::from_config(&config.catalog).unwrap());
    BrowseSession::from_config(catalog, &config)
}

#[tokio::test]
async fn test_search_then_select_over_http() {
    let mut server = mockito::Server::new_async().await;
    let search = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "author:tolkien".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "numFound": 412,
                "docs": [
                    {
                        "key": "/works/OL27479W",
                        "title": "The Two Towers",
                        "author_name": ["J.R.R. Tolkien"],
                        "first_publish_year": 1954,
                        "cover_i": 14627060,
                        "ia": ["twotowers00tolk"]
                    },
                    {
                        "key": "/works/OL262758W",
                        "title": "The Hobbit",
                        "author_name": ["J.R.R. Tolkien"],
                        "first_publish_year": 1937
                    },
                    {
                        "key": "/works/OL1W",
                        "title": "Letters"
                    }
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let details = server
        .mock("GET", "/works/OL262758W.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "title": "The Hobbit",
                "description": {"type": "/type/text", "value": "A hobbit goes on an adventure."},
                "covers": [14627509],
                "authors": [{"author": {"key": "/authors/OL26320A"}, "type": {"key": "/type/author_role"}}],
                "first_publish_date": "September 21, 1937"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let session = session_for(&server);
    let outcome = session.search_for("  tolkien ", SearchField::Author).await;
    assert_eq!(outcome, SearchOutcome::Updated { count: 3 });
    assert_eq!(session.snapshot().total_results, Some(412));

    session.set_sort(SortBy::Year);
    let visible = session.visible();
    assert_eq!(visible[0].title, "The Two Towers");
    assert_eq!(visible[1].title, "The Hobbit");
    assert_eq!(visible[2].title, "Letters");
    assert!(visible[0].is_readable());

    let outcome = session.select(visible[1].clone()).await;
    assert_eq!(outcome, DetailOutcome::Loaded);

    let view = session.details_view().unwrap();
    assert_eq!(view.title, "The Hobbit");
    assert_eq!(view.description.as_deref(), Some("A hobbit goes on an adventure."));
    assert_eq!(view.first_publish_date.as_deref(), Some("September 21, 1937"));
    assert_eq!(
        view.cover_url.as_deref(),
        Some("https://covers.openlibrary.org/b/id/14627509-L.jpg")
    );
    assert!(view.details_available);
    assert_eq!(view.read_url, None);

    search.assert_async().await;
    details.assert_async().await;
}

#[tokio::test]
async fn test_failed_search_keeps_results_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("q".into(), "title:dune".into()))
        .with_status(200)
        .with_body(r#"{"docs": [{"key": "/works/OL893415W", "title": "Dune"}]}"#)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("q".into(), "title:emma".into()))
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let session = session_for(&server);
    session.search_for("dune", SearchField::Title).await;

    let outcome = session.search_for("emma", SearchField::Title).await;
    assert!(matches!(outcome, SearchOutcome::Failed { .. }));

    let state = session.snapshot();
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].title, "Dune");
    assert!(!state.loading);
}

#[tokio::test]
async fn test_details_failure_yields_placeholder_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/works/OL404W.json")
        .with_status(404)
        .create_async()
        .await;

    let session = session_for(&server);
    let book = make_book("OL404W", "Missing Book").cover_id(321);
    assert_eq!(session.select(book).await, DetailOutcome::Unavailable);

    let state = session.snapshot();
    assert_eq!(state.details, DetailState::Unavailable);
    assert_eq!(state.details.record(), Some(BookDetails::unavailable()));

    let view = session.details_view().unwrap();
    assert_eq!(view.title, "Missing Book");
    assert_eq!(view.details_title.as_deref(), Some("Details unavailable"));
    assert_eq!(
        view.cover_url.as_deref(),
        Some("https://covers.openlibrary.org/b/id/321-L.jpg")
    );
}

#[tokio::test]
async fn test_panels_load_independently_over_http() {
    let mut server = mockito::Server::new_async().await;
    let featured = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "subject:computer science".into()),
            Matcher::UrlEncoded("limit".into(), "4".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"docs": [{"key": "/works/OL1W", "title": "SICP", "has_fulltext": true}]}"#)
        .create_async()
        .await;
    let _category = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("q".into(), "subject:mathematics".into()))
        .with_status(500)
        .create_async()
        .await;

    let session = session_for(&server);
    let outcome = session.load_panels().await;
    assert_eq!(
        outcome,
        PanelsOutcome {
            featured: true,
            category: false
        }
    );

    let state = session.snapshot();
    assert_eq!(state.featured.len(), 1);
    assert_eq!(state.featured[0].has_fulltext, Some(true));
    assert!(state.category_panel.is_empty());
    featured.assert_async().await;
}

#[tokio::test]
async fn test_blank_query_issues_no_request_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let session = session_for(&server);
    session.set_query("   ");
    assert_eq!(session.search().await, SearchOutcome::Skipped);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_mock_catalog_session_flow() {
    let catalog = Arc::new(MockCatalog::new());
    catalog.set_search_response(
        "subject:poetry",
        vec![
            make_book("OL1W", "Leaves of Grass")
                .first_publish_year(1855)
                .subjects(["Poetry", "American poetry"]),
            make_book("OL2W", "Ariel")
                .first_publish_year(1965)
                .subjects(["Poetry"]),
            make_book("OL3W", "The Waste Land").subjects(["Modernism"]),
        ],
    );
    assert_eq!(catalog.id(), "mock");

    let session = BrowseSession::new(catalog.clone());
    session.search_for("poetry", SearchField::Subject).await;

    session.set_sort(SortBy::Title);
    session.set_category(Some("american".to_string()));
    let visible = session.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Leaves of Grass");

    session.set_category(None);
    let titles: Vec<String> = session.visible().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Ariel", "Leaves of Grass", "The Waste Land"]);

    assert_eq!(session.select(visible[0].clone()).await, DetailOutcome::Unavailable);
    session.close_details();
    assert!(session.details_view().is_none());
    assert_eq!(catalog.requests(), vec!["subject:poetry", "/works/OL1W"]);
}
