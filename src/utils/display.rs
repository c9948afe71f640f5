//! Terminal display helpers for book listings.
//!
//! Unicode-aware truncation plus column sizing for the results table.

use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(1)).sum()
}

/// Truncate text to fit within `max_width` columns, appending an ellipsis
/// when anything was cut.
///
/// # Examples
///
/// ```
/// use book_finder::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Truncate text at the last word boundary that fits, falling back to
/// character truncation for a single long word.
pub fn truncate_at_word(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut last_space = None;

    for (idx, c) in text.char_indices() {
        if c == ' ' {
            last_space = Some(idx);
        }
        let w = c.width().unwrap_or(1);
        if width + w > budget {
            break;
        }
        width += w;
    }

    match last_space {
        Some(idx) if idx > 0 => format!("{}...", text[..idx].trim_end()),
        _ => truncate_with_ellipsis(text, max_width),
    }
}

/// Format an optional year for a table cell.
pub fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Column widths for the results table: (title, authors, year).
pub fn book_table_columns(terminal_width: usize) -> (usize, usize, usize) {
    // Borders and padding of a three-column UTF8 table
    let usable = terminal_width.saturating_sub(10).max(40);
    let year = 6;
    let title = (usable - year) * 3 / 5;
    let authors = usable - year - title;
    (title, authors, year)
}
