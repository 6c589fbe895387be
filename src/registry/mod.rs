//! Link registry
//!
//! Owns the result of the most recent scan and answers every downstream
//! query: indexed lookup, filtering, statistics, re-validation, per-file
//! color tags, and export. A successful `scan` replaces the whole snapshot;
//! a failed scan leaves the previous snapshot untouched.

mod export;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use url::Url;

use crate::domain::{Entry, FileColor};
use crate::scanner::{ScanError, ScanOptions, Scanner, SkippedFile};

pub use export::{ExportError, ExportFormat};

/// Aggregate counts over the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_links: usize,
    pub total_files: usize,
    pub unique_domains: usize,
}

/// In-memory collection of all links found by the most recent scan
#[derive(Default)]
pub struct LinkRegistry {
    scanner: Scanner,
    entries: Vec<Entry>,
    entries_by_file: IndexMap<PathBuf, Vec<Entry>>,
    file_colors: IndexMap<PathBuf, FileColor>,
    skipped: Vec<SkippedFile>,
    last_scan_path: Option<PathBuf>,
}

impl LinkRegistry {
    /// Creates an empty registry with the standard scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry over a custom scanner
    pub fn with_scanner(scanner: Scanner) -> Self {
        Self {
            scanner,
            ..Self::default()
        }
    }

    /// Scans `root` and replaces the snapshot, returning the entry count.
    ///
    /// Colors are reassigned from scratch, cycling the palette in the order
    /// files were first seen. On scan failure nothing is committed and the
    /// previous snapshot stays queryable.
    pub fn scan(&mut self, root: &Path, options: &ScanOptions) -> Result<usize, ScanError> {
        let report = self.scanner.scan(root, options)?;

        self.entries = report.files.values().flatten().cloned().collect();
        self.file_colors = report
            .files
            .keys()
            .enumerate()
            .map(|(index, path)| (path.clone(), FileColor::for_index(index)))
            .collect();
        self.entries_by_file = report.files;
        self.skipped = report.skipped;
        self.last_scan_path = Some(root.to_path_buf());

        Ok(self.entries.len())
    }

    /// All entries in traversal order
    pub fn all_entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries grouped by source file, in traversal order
    pub fn entries_by_file(&self) -> &IndexMap<PathBuf, Vec<Entry>> {
        &self.entries_by_file
    }

    /// Files skipped during the last scan
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Root of the last scan, if any
    pub fn last_scan_path(&self) -> Option<&Path> {
        self.last_scan_path.as_deref()
    }

    /// Number of entries in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by 1-based index into the flattened list
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Returns the color tag assigned to a source file
    pub fn color_of(&self, path: &Path) -> Option<FileColor> {
        self.file_colors.get(path).copied()
    }

    /// Entries whose description contains `term`, case-insensitively
    pub fn filter(&self, term: &str) -> Vec<&Entry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// Counts links, files, and distinct URL hosts.
    ///
    /// Entries whose URL has no parseable host still count as links; they
    /// just contribute nothing to the domain set.
    pub fn statistics(&self) -> Statistics {
        let mut domains = HashSet::new();
        for entry in &self.entries {
            if let Ok(parsed) = Url::parse(entry.url()) {
                if let Some(host) = parsed.host_str() {
                    domains.insert(host.to_lowercase());
                }
            }
        }

        Statistics {
            total_links: self.entries.len(),
            total_files: self.entries_by_file.len(),
            unique_domains: domains.len(),
        }
    }

    /// Re-checks every entry's URL and returns the failures.
    ///
    /// Construction already enforces these rules, so this normally returns
    /// an empty list; it exists as a guard against entries injected by
    /// custom parsers or future rule drift.
    pub fn validate_all(&self) -> Vec<(Entry, String)> {
        let mut failures = Vec::new();

        for entry in &self.entries {
            match Url::parse(entry.url()) {
                Ok(parsed) => {
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        failures.push((
                            entry.clone(),
                            format!("unsupported URL scheme '{}'", parsed.scheme()),
                        ));
                    } else if parsed.host_str().map_or(true, str::is_empty) {
                        failures.push((entry.clone(), "URL has no host".to_string()));
                    }
                }
                Err(err) => {
                    failures.push((entry.clone(), format!("URL does not parse: {err}")));
                }
            }
        }

        failures
    }

    /// Serializes the snapshot in the requested format
    pub fn export_as(&self, format: ExportFormat) -> Result<String, ExportError> {
        export::render(self, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seeded_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.dokk"), "\"X\" -> \"https://x.test\"\n").unwrap();
        fs::write(dir.path().join("b.dokk"), "\"Y\" -> \"https://y.test\"\n").unwrap();
        dir
    }

    fn scanned(dir: &TempDir) -> LinkRegistry {
        let mut registry = LinkRegistry::new();
        registry.scan(dir.path(), &ScanOptions::default()).unwrap();
        registry
    }

    #[test]
    fn scan_counts_and_statistics() {
        let dir = seeded_dir();
        let mut registry = LinkRegistry::new();

        let total = registry.scan(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(total, 2);
        assert_eq!(
            registry.statistics(),
            Statistics {
                total_links: 2,
                total_files: 2,
                unique_domains: 2,
            }
        );
    }

    #[test]
    fn statistics_before_any_scan_are_zero() {
        let registry = LinkRegistry::new();
        assert_eq!(
            registry.statistics(),
            Statistics {
                total_links: 0,
                total_files: 0,
                unique_domains: 0,
            }
        );
    }

    #[test]
    fn duplicate_hosts_collapse_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("links.dokk"),
            "\"One\" -> \"https://Docs.Test/a\"\n\"Two\" -> \"https://docs.test/b\"\n",
        )
        .unwrap();

        let registry = scanned(&dir);
        assert_eq!(registry.statistics().unique_domains, 1);
        assert_eq!(registry.statistics().total_links, 2);
    }

    #[test]
    fn entry_at_is_one_based_and_bounded() {
        let dir = seeded_dir();
        let registry = scanned(&dir);

        assert!(registry.entry_at(0).is_none());
        assert_eq!(registry.entry_at(1).unwrap().description(), "X");
        assert_eq!(registry.entry_at(2).unwrap().description(), "Y");
        assert!(registry.entry_at(3).is_none());
    }

    #[test]
    fn filter_matches_description_case_insensitively() {
        let dir = seeded_dir();
        let registry = scanned(&dir);

        let hits = registry.filter("x");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description(), "X");

        assert!(registry.filter("nothing").is_empty());
    }

    #[test]
    fn colors_follow_first_seen_order() {
        let dir = seeded_dir();
        let registry = scanned(&dir);

        let files: Vec<_> = registry.entries_by_file().keys().cloned().collect();
        assert_eq!(registry.color_of(&files[0]), Some(FileColor::Red));
        assert_eq!(registry.color_of(&files[1]), Some(FileColor::Green));
        assert_eq!(registry.color_of(Path::new("unknown.dokk")), None);
    }

    #[test]
    fn failed_scan_keeps_previous_snapshot() {
        let dir = seeded_dir();
        let mut registry = LinkRegistry::new();
        registry.scan(dir.path(), &ScanOptions::default()).unwrap();

        let err = registry
            .scan(&dir.path().join("missing"), &ScanOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.last_scan_path(), Some(dir.path()));
    }

    #[test]
    fn rescan_replaces_snapshot_wholesale() {
        let dir = seeded_dir();
        let mut registry = LinkRegistry::new();
        registry.scan(dir.path(), &ScanOptions::default()).unwrap();

        let other = TempDir::new().unwrap();
        fs::write(
            other.path().join("only.dokk"),
            "\"Only\" -> \"https://only.test\"\n",
        )
        .unwrap();

        let total = registry.scan(other.path(), &ScanOptions::default()).unwrap();
        assert_eq!(total, 1);
        assert_eq!(registry.all_entries().len(), 1);
        assert_eq!(registry.all_entries()[0].description(), "Only");
        assert_eq!(registry.last_scan_path(), Some(other.path()));
    }

    #[test]
    fn validate_all_passes_for_scanned_entries() {
        let dir = seeded_dir();
        let registry = scanned(&dir);
        assert!(registry.validate_all().is_empty());
    }

    #[test]
    fn skipped_files_are_surfaced() {
        let dir = seeded_dir();
        fs::write(dir.path().join("broken.dokk"), "garbage\n").unwrap();

        let registry = scanned(&dir);
        assert_eq!(registry.skipped().len(), 1);
        assert!(registry.skipped()[0].path.ends_with("broken.dokk"));
        assert_eq!(registry.len(), 2);
    }
}
