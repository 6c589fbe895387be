//! Link-file parsing
//!
//! A [`LinkParser`] turns one link file into a sequence of validated
//! [`Entry`] values. Parsers are strict: a file either parses completely or
//! contributes nothing. The [`ParserRegistry`] selects the right parser for
//! a file, consulting registered parsers in priority order so custom formats
//! can override the built-in one.

mod standard;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Entry, EntryError};

pub use standard::{StandardParser, LINK_FILE_EXTENSION};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid line {line} in {}: {content}", .path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("invalid entry at line {line} in {}: {source}", .path.display())]
    InvalidEntry {
        path: PathBuf,
        line: usize,
        #[source]
        source: EntryError,
    },

    #[error("no parser available for file: {}", .0.display())]
    NoParser(PathBuf),
}

/// Capability interface for link-file parsers.
///
/// Implementations declare which files they recognize and turn file text
/// into entries in line order. Parsing is whole-file atomic: the first
/// invalid line fails the file and discards anything parsed before it.
pub trait LinkParser {
    /// Returns true if this parser recognizes the file
    fn can_handle(&self, path: &Path) -> bool;

    /// Parses the file into entries, preserving line order
    fn parse(&self, path: &Path) -> Result<Vec<Entry>, ParseError>;
}

/// Ordered collection of parsers with first-match selection.
///
/// Later registrations take priority over earlier ones, so a custom parser
/// registered at runtime shadows the built-in standard parser for any file
/// both can handle.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn LinkParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self {
            parsers: vec![Box::new(StandardParser)],
        }
    }
}

impl ParserRegistry {
    /// Creates a registry with the standard parser installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parser with priority over all existing ones
    pub fn register(&mut self, parser: Box<dyn LinkParser>) {
        self.parsers.insert(0, parser);
    }

    /// Returns the first registered parser able to handle the file
    pub fn parser_for(&self, path: &Path) -> Option<&dyn LinkParser> {
        self.parsers
            .iter()
            .find(|p| p.can_handle(path))
            .map(|p| p.as_ref())
    }

    /// Parses a file with the first capable parser
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Entry>, ParseError> {
        let parser = self
            .parser_for(path)
            .ok_or_else(|| ParseError::NoParser(path.to_path_buf()))?;

        parser.parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parser that claims every file and returns a fixed entry
    struct FixedParser;

    impl LinkParser for FixedParser {
        fn can_handle(&self, _path: &Path) -> bool {
            true
        }

        fn parse(&self, path: &Path) -> Result<Vec<Entry>, ParseError> {
            Ok(vec![Entry::new("fixed", "https://fixed.test", path).unwrap()])
        }
    }

    #[test]
    fn no_parser_for_unknown_extension() {
        let registry = ParserRegistry::new();
        let err = registry.parse_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, ParseError::NoParser(_)));
    }

    #[test]
    fn standard_parser_selected_for_dokk_files() {
        let registry = ParserRegistry::new();
        assert!(registry.parser_for(Path::new("links.dokk")).is_some());
        assert!(registry.parser_for(Path::new("links.DOKK")).is_some());
        assert!(registry.parser_for(Path::new("links.md")).is_none());
    }

    #[test]
    fn registered_parser_takes_priority() {
        let mut registry = ParserRegistry::new();
        registry.register(Box::new(FixedParser));

        // FixedParser claims .dokk files too, and wins by registration order
        let entries = registry.parse_file(Path::new("links.dokk")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description(), "fixed");
    }
}
