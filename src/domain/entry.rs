//! Link entry domain model
//!
//! An entry is one validated (description, URL) pair parsed from a single
//! line of a link file. Entries are constructed only through [`Entry::new`],
//! so every entry in the system is valid by construction.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("empty description")]
    EmptyDescription,

    #[error("empty URL for '{description}'")]
    EmptyUrl { description: String },

    #[error("invalid URL '{url}' for '{description}': only http:// and https:// are supported")]
    InvalidScheme { description: String, url: String },
}

/// One validated link: a description, a URL, and the file it came from.
///
/// Both texts are trimmed on construction. The URL scheme must be exactly
/// `http` or `https` (no case folding or normalization). The source file is
/// a back-reference for display and grouping, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    description: String,
    url: String,
    source_file: PathBuf,
}

impl Entry {
    /// Creates a validated entry, trimming description and URL
    pub fn new(
        description: &str,
        url: &str,
        source_file: impl Into<PathBuf>,
    ) -> Result<Self, EntryError> {
        let description = description.trim().to_string();
        let url = url.trim().to_string();

        if description.is_empty() {
            return Err(EntryError::EmptyDescription);
        }
        if url.is_empty() {
            return Err(EntryError::EmptyUrl { description });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(EntryError::InvalidScheme { description, url });
        }

        Ok(Self {
            description,
            url,
            source_file: source_file.into(),
        })
    }

    /// Returns the link description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the link URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the file this entry was parsed from
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.description, self.url)
    }
}
