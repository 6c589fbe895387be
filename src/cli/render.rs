//! Terminal rendering helpers for link listings

use crossterm::style::{Color, Stylize};

use crate::config::DisplayConfig;
use crate::domain::{Entry, FileColor};

/// Maps a palette tag to a terminal color
pub fn terminal_color(color: FileColor) -> Color {
    match color {
        FileColor::Red => Color::Red,
        FileColor::Green => Color::Green,
        FileColor::Yellow => Color::Yellow,
        FileColor::Blue => Color::Blue,
        FileColor::Magenta => Color::Magenta,
        FileColor::Cyan => Color::Cyan,
        FileColor::White => Color::White,
    }
}

/// Truncates text to `max` characters, marking the cut with an ellipsis
pub fn clip(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }

    let clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{clipped}…")
}

/// Wraps a URL in an OSC 8 hyperlink sequence
pub fn hyperlink(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
}

/// Formats the two listing lines for one numbered entry
pub fn entry_lines(
    number: usize,
    entry: &Entry,
    color: Option<FileColor>,
    display: &DisplayConfig,
) -> (String, String) {
    let description = clip(entry.description(), display.max_description_length);
    let description = match color {
        Some(c) if display.colors => description.with(terminal_color(c)).to_string(),
        _ => description,
    };

    let url = if display.hyperlinks {
        hyperlink(entry.url())
    } else {
        entry.url().to_string()
    };

    (format!("{number:3}. {description}"), format!("     {url}"))
}
