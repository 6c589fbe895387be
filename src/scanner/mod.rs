//! Directory scanning for link files
//!
//! The scanner walks a directory tree, hands every candidate file to the
//! parser registry, and collects per-file results. Parsing failures are
//! per-file: a bad file is recorded as skipped and the scan moves on. Only
//! a missing or non-directory root fails the whole scan.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use walkdir::WalkDir;

use crate::domain::Entry;
use crate::parser::ParserRegistry;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Scan-time options, injected by the caller (typically from configuration)
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Descend into subdirectories
    pub recursive: bool,

    /// Depth cap for recursive scans (1 = direct children only)
    pub max_depth: Option<usize>,

    /// Directory names pruned from traversal
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: None,
            excluded_dirs: vec![".git".to_string()],
        }
    }
}

/// A file that was found but contributed nothing, with the reason
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one scan pass
#[derive(Debug, Default)]
pub struct ScanReport {
    /// File -> entries, in traversal order; only files with >= 1 entry
    pub files: IndexMap<PathBuf, Vec<Entry>>,

    /// Files that failed to parse and were skipped
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Total number of entries across all files
    pub fn entry_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Returns true if no file contributed entries
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walks a directory and parses every file a registered parser can handle
#[derive(Default)]
pub struct Scanner {
    parsers: ParserRegistry,
}

impl Scanner {
    /// Creates a scanner with the standard parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner over a custom parser registry
    pub fn with_parsers(parsers: ParserRegistry) -> Self {
        Self { parsers }
    }

    /// Gives mutable access to the parser registry for registration
    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    /// Scans `root` for link files.
    ///
    /// Traversal is lexical by file name at every level, so results are
    /// stable for a given filesystem snapshot. Files whose parse yields no
    /// entries are omitted silently; files that fail to parse land in the
    /// report's `skipped` list.
    pub fn scan(&self, root: &Path, options: &ScanOptions) -> Result<ScanReport, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut report = ScanReport::default();

        for candidate in self.candidates(root, options, &mut report.skipped) {
            match self.parsers.parse_file(&candidate) {
                Ok(entries) => {
                    if !entries.is_empty() {
                        report.files.insert(candidate, entries);
                    }
                }
                Err(err) => report.skipped.push(SkippedFile {
                    path: candidate,
                    reason: err.to_string(),
                }),
            }
        }

        Ok(report)
    }

    /// Enumerates files some registered parser can handle, in lexical order
    fn candidates(
        &self,
        root: &Path,
        options: &ScanOptions,
        skipped: &mut Vec<SkippedFile>,
    ) -> Vec<PathBuf> {
        let depth = if options.recursive {
            options.max_depth.unwrap_or(usize::MAX)
        } else {
            1
        };

        let walker = WalkDir::new(root)
            .max_depth(depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry, &options.excluded_dirs));

        let mut candidates = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.parsers.parser_for(entry.path()).is_some()
                    {
                        candidates.push(entry.path().to_path_buf());
                    }
                }
                Err(err) => {
                    // Unreadable directories are a skip, not a scan failure
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        candidates
    }
}

fn is_excluded_dir(entry: &walkdir::DirEntry, excluded: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.iter().any(|ex| ex == name))
}
