use anyhow::{bail, Result};
use book_finder::catalog::{Catalog, OpenLibraryCatalog};
use book_finder::config::{find_config_file, load_config};
use book_finder::models::{Book, BookDetails, SearchField, SortBy};
use book_finder::session::{BrowseSession, DetailOutcome, SearchOutcome};
use book_finder::ui::{self, Spinner, Status};
use book_finder::utils::{
    book_table_columns, format_year, terminal_width, truncate_with_ellipsis, CoverSize, Links,
};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - Search the Open Library catalog
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Search the Open Library catalog, browse curated panels and inspect book details", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Client-side ordering of results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    /// Catalog order
    Relevance,
    /// Newest first, undated last
    Year,
    /// Alphabetical, case-insensitive
    Title,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => SortBy::Relevance,
            SortArg::Year => SortBy::Year,
            SortArg::Title => SortBy::Title,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for books
    #[command(alias = "s")]
    Search {
        /// Search text
        query: String,

        /// Field to search: title, author or subject (unknown values search titles)
        #[arg(long, short, default_value = "title")]
        field: String,

        /// Sort results
        #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
        sort: SortArg,

        /// Only show books with a subject containing this text
        #[arg(long, short)]
        category: Option<String>,

        /// Only show books whose title contains this text
        #[arg(long)]
        collection: Option<String>,

        /// Maximum number of results (default from configuration)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Show cover, read and download links
        #[arg(long)]
        links: bool,

        /// Open the details view for the N-th shown result (1-based)
        #[arg(long)]
        select: Option<usize>,
    },

    /// Show the detail record for a work key (e.g. /works/OL45883W)
    #[command(alias = "d")]
    Details {
        /// Work key
        key: String,
    },

    /// Show the curated computer science and mathematics panels
    Featured,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.catalog.timeout_secs = timeout;
        config.validate()?;
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let format = resolve_format(cli.output);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let catalog: Arc<dyn Catalog> = Arc::new(OpenLibraryCatalog::from_config(&config.catalog)?);
    let session = BrowseSession::from_config(catalog.clone(), &config);
    let show_spinner =
        !cli.quiet && format == OutputFormat::Table && std::io::stderr().is_terminal();

    match command {
        Commands::Search {
            query,
            field,
            sort,
            category,
            collection,
            limit,
            links,
            select,
        } => {
            let session = match limit {
                Some(0) => bail!("--limit must be greater than zero"),
                Some(limit) => session.with_limits(limit, config.search.panel_limit),
                None => session,
            };
            session.set_sort(sort.into());
            session.set_category(category);
            session.set_collection(collection);

            let field = SearchField::from_selector(&field);
            let spinner = new_spinner(show_spinner, &format!("Searching {}s...", field));
            let started = Instant::now();

            match session.search_for(&query, field).await {
                SearchOutcome::Skipped => {
                    spinner.clear();
                    if !cli.quiet {
                        ui::print_status(Status::Info, "Enter some text to search.");
                    }
                    return Ok(());
                }
                SearchOutcome::Updated { count } => {
                    spinner.finish_with_success(&format!("Found {} books", count));
                }
                SearchOutcome::Failed { error } => {
                    spinner.finish_with_error("Search failed");
                    if !cli.quiet {
                        ui::print_status(Status::Error, &error);
                    }
                }
            }

            let visible = session.visible();
            let state = session.snapshot();

            if let Some(n) = select {
                let Some(book) = n.checked_sub(1).and_then(|i| visible.get(i)).cloned() else {
                    bail!(
                        "--select {} is out of range ({} books shown)",
                        n,
                        visible.len()
                    );
                };
                return show_selection(&session, book, format, show_spinner).await;
            }

            if format == OutputFormat::Table && !cli.quiet {
                ui::print_search_header(
                    &query,
                    visible.len(),
                    state.total_results,
                    started.elapsed(),
                );
            }
            output_books(&visible, format, session.links(), links)?;
        }

        Commands::Details { key } => {
            let spinner = new_spinner(show_spinner, "Loading details...");
            let details = match catalog.get_details(&key).await {
                Ok(details) => {
                    spinner.clear();
                    details
                }
                Err(e) => {
                    spinner.finish_with_error("Details unavailable");
                    tracing::error!("Error fetching book details for {}: {}", key, e);
                    BookDetails::unavailable()
                }
            };
            output_details(&key, &details, format, session.links())?;
        }

        Commands::Featured => {
            let spinner = new_spinner(show_spinner, "Loading curated panels...");
            let outcome = session.load_panels().await;
            spinner.clear();
            if !cli.quiet && !(outcome.featured && outcome.category) {
                ui::print_status(Status::Warning, "Some panels could not be loaded");
            }

            let state = session.snapshot();
            match format {
                OutputFormat::Json => {
                    let panels = serde_json::json!({
                        "featured": state.featured,
                        "category": state.category_panel,
                    });
                    println!("{}", serde_json::to_string_pretty(&panels)?);
                }
                OutputFormat::Plain => {
                    println!("Featured: Computer Science");
                    output_books(&state.featured, format, session.links(), false)?;
                    println!("Category: Mathematics");
                    output_books(&state.category_panel, format, session.links(), false)?;
                }
                _ => {
                    let links = session.links();
                    ui::print_panel("Featured: Computer Science", &state.featured, links);
                    ui::print_panel("Category: Mathematics", &state.category_panel, links);
                }
            }
        }

        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn new_spinner(show: bool, msg: &str) -> Spinner {
    if show {
        Spinner::new(msg)
    } else {
        Spinner::hidden()
    }
}

async fn show_selection(
    session: &BrowseSession,
    book: Book,
    format: OutputFormat,
    show_spinner: bool,
) -> Result<()> {
    let spinner = new_spinner(show_spinner, &format!("Loading {}...", book.title));
    let outcome = session.select(book).await;
    spinner.clear();
    tracing::debug!("Detail lookup finished: {:?}", outcome);

    let Some(view) = session.details_view() else {
        bail!("No book selected");
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Plain => {
            println!("{}", view.title);
            println!("  Authors: {}", view.authors.join(", "));
            println!("  Year: {}", format_year(view.first_publish_year));
            if outcome == DetailOutcome::Unavailable {
                println!("  Details unavailable");
            } else if let Some(description) = &view.description {
                println!("  {}", description);
            }
            if let Some(url) = &view.read_url {
                println!("  Read: {}", url);
            }
            if let Some(url) = &view.download_url {
                println!("  Download: {}", url);
            }
        }
        _ => ui::print_details(&view),
    }
    Ok(())
}

fn output_details(
    key: &str,
    details: &BookDetails,
    format: OutputFormat,
    links: &Links,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(details)?),
        OutputFormat::Plain => {
            println!("{} ({})", details.title, key);
            if let Some(date) = &details.first_publish_date {
                println!("  First published: {}", date);
            }
            if let Some(description) = &details.description {
                println!("  {}", description);
            }
        }
        _ => {
            ui::print_section(&details.title);
            println!("  Key: {}", key);
            if let Some(date) = &details.first_publish_date {
                println!("  First published: {}", date);
            }
            if let Some(id) = details.cover_id() {
                println!("  Cover: {}", links.cover(id, CoverSize::Large));
            }
            if !details.authors.is_empty() {
                let keys: Vec<&str> = details.authors.iter().map(|a| a.key.as_str()).collect();
                println!("  Authors: {}", keys.join(", "));
            }
            if !details.subjects.is_empty() {
                println!("  Subjects: {}", details.subjects.join(", "));
            }
            if let Some(description) = &details.description {
                println!();
                println!("  {}", description);
            }
        }
    }
    Ok(())
}

const LINK_LABELS: [&str; 3] = ["Cover", "Read", "Download"];

/// Cover, read and download links of a book, labelled in display order
fn book_links(book: &Book, links: &Links) -> [(&'static str, Option<String>); 3] {
    let [cover, read, download] = LINK_LABELS;
    [
        (cover, links.book_cover(book, CoverSize::Large)),
        (read, links.read(book)),
        (download, links.download(book)),
    ]
}

fn output_books(
    books: &[Book],
    format: OutputFormat,
    links: &Links,
    show_links: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(books)?);
        }
        OutputFormat::Plain => {
            for book in books {
                println!(
                    "{} - {} ({})",
                    book.title,
                    book.author_line(),
                    format_year(book.first_publish_year)
                );
                if show_links {
                    for (label, url) in book_links(book, links) {
                        if let Some(url) = url {
                            println!("  {}: {}", label, url);
                        }
                    }
                }
            }
        }
        _ => {
            use comfy_table::{Attribute, Cell, Color, Table};
            let (title_width, author_width, _) = book_table_columns(terminal_width());

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            let mut header = vec!["#", "Title", "Authors", "Year", ""];
            if show_links {
                header.extend(LINK_LABELS);
            }
            table.set_header(header);

            for (i, book) in books.iter().enumerate() {
                let badge = if book.is_readable() {
                    Cell::new("Read online").fg(Color::Green)
                } else {
                    Cell::new("")
                };
                let mut row = vec![
                    Cell::new(i + 1),
                    Cell::new(truncate_with_ellipsis(&book.title, title_width))
                        .add_attribute(Attribute::Bold),
                    Cell::new(truncate_with_ellipsis(&book.author_line(), author_width)),
                    Cell::new(format_year(book.first_publish_year)),
                    badge,
                ];
                if show_links {
                    row.extend(
                        book_links(book, links)
                            .into_iter()
                            .map(|(_, url)| Cell::new(url.unwrap_or_default())),
                    );
                }
                table.add_row(row);
            }
            println!("{table}");
        }
    }
    Ok(())
}
