//! Browsing session: the state behind a search page and its details view.
//!
//! A [`BrowseSession`] owns the current query controls, the last good result
//! set, the two curated panels and the selected book. It is a cheap handle;
//! clones share the same state, so a renderer can poll [`BrowseSession::snapshot`]
//! while a request is in flight. Every state change replaces whole values under
//! a short lock that is never held across an `await`.
//!
//! Network failures never surface as errors here. A failed search leaves the
//! previous results in place, a failed detail lookup moves the details to
//! [`DetailState::Unavailable`], and both are logged.

mod view;

pub use view::DetailView;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{
    Book, BookFilter, DetailState, QuerySelection, SearchField, SearchQuery, SortBy, PANEL_FIELDS,
};
use crate::utils::{filter_books, order_books, Links};

/// Subject of the "featured" curated panel
pub const FEATURED_SUBJECT: &str = "computer science";

/// Subject of the "category" curated panel
pub const CATEGORY_SUBJECT: &str = "mathematics";

/// Snapshot of everything a renderer needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub selection: QuerySelection,
    /// Last good search results, in catalog order
    pub results: Vec<Book>,
    pub total_results: Option<usize>,
    pub loading: bool,
    pub featured: Vec<Book>,
    pub category_panel: Vec<Book>,
    pub selected: Option<Book>,
    pub details: DetailState,
    detail_generation: u64,
}

/// What a search call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, no request issued
    Skipped,
    /// Results replaced
    Updated { count: usize },
    /// Request failed, previous results kept
    Failed { error: String },
}

/// What a detail lookup did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Loaded,
    /// Lookup failed, details marked unavailable
    Unavailable,
    /// Another book was selected (or the view closed) before the response arrived
    Superseded,
}

/// Which curated panels loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelsOutcome {
    pub featured: bool,
    pub category: bool,
}

/// Handle to a browsing session
#[derive(Debug, Clone)]
pub struct BrowseSession {
    catalog: Arc<dyn Catalog>,
    state: Arc<Mutex<SessionState>>,
    links: Links,
    search_limit: usize,
    panel_limit: usize,
}

impl BrowseSession {
    /// Create a session with default limits and link hosts
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(SessionState::default())),
            links: Links::default(),
            search_limit: 20,
            panel_limit: 4,
        }
    }

    /// Create a session using limits and link hosts from configuration
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &Config) -> Self {
        Self::new(catalog)
            .with_links(config.catalog.links())
            .with_limits(config.search.limit, config.search.panel_limit)
    }

    /// Set the link builder
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }

    /// Set the user search and curated panel limits
    pub fn with_limits(mut self, search_limit: usize, panel_limit: usize) -> Self {
        self.search_limit = search_limit;
        self.panel_limit = panel_limit;
        self
    }

    /// Link builder used by this session
    pub fn links(&self) -> &Links {
        &self.links
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Whether a search is in flight
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    // ========== QUERY CONTROLS ==========

    pub fn set_query(&self, text: impl Into<String>) {
        self.lock().selection.text = text.into();
    }

    pub fn set_field(&self, field: SearchField) {
        self.lock().selection.field = field;
    }

    pub fn set_sort(&self, sort: SortBy) {
        self.lock().selection.sort = sort;
    }

    pub fn set_category(&self, category: Option<String>) {
        self.lock().selection.filter.category = category;
    }

    pub fn set_collection(&self, collection: Option<String>) {
        self.lock().selection.filter.collection = collection;
    }

    pub fn set_filter(&self, filter: BookFilter) {
        self.lock().selection.filter = filter;
    }

    // ========== SEARCH ==========

    /// Search using the current query text and field.
    pub async fn search(&self) -> SearchOutcome {
        let (text, field) = {
            let state = self.lock();
            (state.selection.text.clone(), state.selection.field)
        };

        let Some(query) = SearchQuery::from_text(&text, field) else {
            tracing::debug!("Blank query, no search issued");
            return SearchOutcome::Skipped;
        };
        let query = query.limit(self.search_limit);

        self.lock().loading = true;
        tracing::info!("Searching {} for {}", self.catalog.name(), query.term);
        let result = self.catalog.search(&query).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(response) => {
                let count = response.books.len();
                state.results = response.books;
                state.total_results = response.total_results;
                SearchOutcome::Updated { count }
            }
            Err(e) => {
                tracing::error!("Error searching books: {}", e);
                SearchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Set the query text and field, then search.
    pub async fn search_for(&self, text: &str, field: SearchField) -> SearchOutcome {
        {
            let mut state = self.lock();
            state.selection.text = text.to_string();
            state.selection.field = field;
        }
        self.search().await
    }

    /// Current results ordered by the selected sort, then filtered.
    pub fn visible(&self) -> Vec<Book> {
        let state = self.lock();
        let ordered = order_books(&state.results, state.selection.sort);
        filter_books(&ordered, &state.selection.filter)
    }

    // ========== CURATED PANELS ==========

    /// Load both curated panels concurrently. Each panel fails on its own.
    pub async fn load_panels(&self) -> PanelsOutcome {
        let (featured, category) = tokio::join!(
            self.fetch_panel(FEATURED_SUBJECT),
            self.fetch_panel(CATEGORY_SUBJECT)
        );

        let mut state = self.lock();
        let outcome = PanelsOutcome {
            featured: featured.is_some(),
            category: category.is_some(),
        };
        if let Some(books) = featured {
            state.featured = books;
        }
        if let Some(books) = category {
            state.category_panel = books;
        }
        outcome
    }

    async fn fetch_panel(&self, subject: &str) -> Option<Vec<Book>> {
        let query = SearchQuery::from_text(subject, SearchField::Subject)?
            .limit(self.panel_limit)
            .fields(PANEL_FIELDS);

        match self.catalog.search(&query).await {
            Ok(response) => Some(response.books),
            Err(e) => {
                tracing::error!("Error fetching {} books: {}", subject, e);
                None
            }
        }
    }

    // ========== DETAILS ==========

    /// Select a book and look up its details.
    ///
    /// The previous detail record is cleared immediately. If another book is
    /// selected or the view is closed before the response arrives, the
    /// response is dropped.
    pub async fn select(&self, book: Book) -> DetailOutcome {
        let key = book.key.clone();
        let generation = {
            let mut state = self.lock();
            state.detail_generation += 1;
            state.selected = Some(book);
            state.details = DetailState::Loading;
            state.detail_generation
        };

        tracing::debug!("Book selected: {}", key);
        let result = self.catalog.get_details(&key).await;

        let mut state = self.lock();
        if state.detail_generation != generation {
            tracing::debug!("Discarding stale details for {}", key);
            return DetailOutcome::Superseded;
        }

        match result {
            Ok(details) => {
                state.details = DetailState::Loaded(details);
                DetailOutcome::Loaded
            }
            Err(e) => {
                tracing::error!("Error fetching book details for {}: {}", key, e);
                state.details = DetailState::Unavailable;
                DetailOutcome::Unavailable
            }
        }
    }

    /// Dismiss the details view and drop its record.
    pub fn close_details(&self) {
        let mut state = self.lock();
        state.detail_generation += 1;
        state.selected = None;
        state.details = DetailState::Empty;
    }

    /// The details view for the selected book, if any.
    pub fn details_view(&self) -> Option<DetailView> {
        let state = self.lock();
        state
            .selected
            .as_ref()
            .map(|book| DetailView::compose(book, &state.details, &self.links))
    }
}
