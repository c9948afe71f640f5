//! Terminal rendering for the CLI.
//!
//! Colored status lines, book cards, the details panel and a spinner for
//! requests in flight.

use owo_colors::OwoColorize;
use std::time::Duration;

use crate::models::Book;
use crate::session::DetailView;
use crate::utils::{format_year, truncate_at_word, truncate_with_ellipsis, Links};

const CARD_WIDTH: usize = 70;
const DESCRIPTION_WIDTH: usize = 600;

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
        Status::Read => "📖",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
    Read,
}

/// Print a styled status message to stderr.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => eprintln!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => eprintln!("{} {}", icon.cyan().bold(), msg),
        Status::Search | Status::Read => eprintln!("{} {}", icon.yellow(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print search results header.
pub fn print_search_header(term: &str, shown: usize, total: Option<usize>, duration: Duration) {
    println!();
    println!(
        "{} Search results for: \"{}\"",
        status_icon(Status::Search).yellow().bold(),
        term.cyan().bold()
    );
    let total = total
        .map(|t| format!(" of {}", format_number(t)))
        .unwrap_or_default();
    println!(
        "{} Showing {}{} books in {:.2}s",
        "─".repeat(30).dimmed(),
        shown.to_string().green().bold(),
        total,
        duration.as_secs_f64().white()
    );
    println!();
}

/// Print a book as a card: title, authors, year, cover and a badge when
/// the book can be read online.
pub fn print_book_card(index: usize, book: &Book, links: &Links) {
    println!(
        "{} {}",
        format!("{:>2}.", index).dimmed(),
        truncate_with_ellipsis(&book.title, CARD_WIDTH).blue().bold()
    );

    let authors = if book.authors.is_empty() {
        "Unknown author".to_string()
    } else {
        book.author_line()
    };
    println!(
        "    {} {}",
        truncate_with_ellipsis(&authors, CARD_WIDTH - 10),
        format!("({})", format_year(book.first_publish_year)).yellow()
    );

    if book.is_readable() {
        println!("    {}", "Read online".green().bold());
    }
    if let Some(cover) = links.book_cover(book, crate::utils::CoverSize::Large) {
        println!("    {} {}", "Cover:".dimmed(), cover);
    }
}

/// Print a curated panel of books.
pub fn print_panel(title: &str, books: &[Book], links: &Links) {
    print_section(title);
    if books.is_empty() {
        println!("{}", "  No books".dimmed());
        return;
    }
    for (i, book) in books.iter().enumerate() {
        print_book_card(i + 1, book, links);
    }
}

/// Print the details panel for a selected book.
pub fn print_details(view: &DetailView) {
    print_section(&view.title);

    if !view.authors.is_empty() {
        println!("  {} {}", "Authors:".bold(), view.authors.join(", "));
    }
    println!(
        "  {} {}",
        "First published:".bold(),
        view.first_publish_date
            .clone()
            .unwrap_or_else(|| format_year(view.first_publish_year))
    );
    if let Some(editions) = view.edition_count {
        println!("  {} {}", "Editions:".bold(), format_number(editions as usize));
    }
    if !view.languages.is_empty() {
        println!("  {} {}", "Languages:".bold(), view.languages.join(", "));
    }
    if !view.publishers.is_empty() {
        println!("  {} {}", "Publishers:".bold(), view.publishers.join(", "));
    }
    if let Some(cover) = &view.cover_url {
        println!("  {} {}", "Cover:".bold(), cover);
    }
    if !view.subjects.is_empty() {
        println!("  {} {}", "Subjects:".bold(), view.subjects.join(" · ").cyan());
    }

    println!();
    if view.loading {
        println!("  {}", "Loading details...".dimmed());
    } else if !view.details_available {
        print_status(Status::Warning, "Details unavailable");
    } else if let Some(description) = &view.description {
        println!("  {}", truncate_at_word(description, DESCRIPTION_WIDTH));
    } else {
        println!("  {}", "No description available.".dimmed());
    }

    if view.read_url.is_some() || view.download_url.is_some() {
        println!();
    }
    if let Some(url) = &view.read_url {
        println!("  {} {}", status_icon(Status::Read), url.green());
    }
    if let Some(url) = &view.download_url {
        println!("  {} {}", "↓".magenta(), url);
    }
}

/// Format a number with commas.
pub fn format_number(n: usize) -> String {
    n.to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

fn spinner_style(template: &str, ticks: &str) -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template(template)
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
        .tick_chars(ticks)
}

/// A loading spinner shown while a request is in flight.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(spinner_style("{spinner:.cyan} {msg}", "⠁⠂⠄⡀⢀⠠⠐⠈ "));
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for quiet or non-terminal output.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Finish with success message.
    pub fn finish_with_success(&self, msg: &str) {
        self.pb.set_style(spinner_style("{spinner:.green} {msg}", "✓✓"));
        self.pb.finish_with_message(msg.to_string());
    }

    /// Finish with error message.
    pub fn finish_with_error(&self, msg: &str) {
        self.pb.set_style(spinner_style("{spinner:.red} {msg}", "✗✗"));
        self.pb.finish_with_message(msg.to_string());
    }

    /// Remove the spinner from the terminal.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}
