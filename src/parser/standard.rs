//! Standard link-file parser
//!
//! The standard format is line-oriented:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! "Team wiki" -> "https://wiki.example.com"
//! "CI dashboard" -> "https://ci.example.com/dashboard"
//! ```
//!
//! Every other line must match the quoted-arrow pattern at line start.
//! Files are read as UTF-8 with a Latin-1 fallback for legacy encodings.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LinkParser, ParseError};
use crate::domain::Entry;

/// Extension recognized by the standard parser (matched case-insensitively)
pub const LINK_FILE_EXTENSION: &str = "dokk";

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^"]+)"\s*->\s*"([^"]+)""#).expect("link line pattern is valid")
});

/// Parser for the standard `"description" -> "url"` format
pub struct StandardParser;

impl LinkParser for StandardParser {
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(LINK_FILE_EXTENSION))
    }

    fn parse(&self, path: &Path) -> Result<Vec<Entry>, ParseError> {
        if !path.exists() {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ParseError::NotAFile(path.to_path_buf()));
        }

        let content = read_text(path)?;
        let mut entries = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let captures =
                LINE_PATTERN
                    .captures(line)
                    .ok_or_else(|| ParseError::InvalidLine {
                        path: path.to_path_buf(),
                        line: line_number,
                        content: line.to_string(),
                    })?;

            let entry = Entry::new(&captures[1], &captures[2], path).map_err(|source| {
                ParseError::InvalidEntry {
                    path: path.to_path_buf(),
                    line: line_number,
                    source,
                }
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }
}

/// Reads file text as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the same code point, so the fallback always
/// produces a string; only an I/O failure makes the file unreadable.
fn read_text(path: &Path) -> Result<String, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => Ok(err.into_bytes().iter().map(|&b| b as char).collect()),
    }
}
