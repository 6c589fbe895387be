//! dokk - a command-line launcher for team documentation links
//!
//! dokk scans a directory tree for `.dokk` link files, each a small
//! declarative list of `"description" -> "url"` lines, and presents the
//! collected links through CLI subcommands or an interactive menu that
//! opens them in the browser.
//!
//! ## Architecture
//!
//! ```text
//! Scanner (Parser per file) → Link Registry → CLI / menu
//! ```
//!
//! - [`parser`]: strict per-file parsing of the quoted-arrow grammar
//! - [`scanner`]: tolerant directory traversal; bad files are skipped and
//!   reported, never fatal
//! - [`registry`]: the in-memory snapshot every query and export reads from
//! - [`browser`]: opens URLs via the system browser
//! - [`cli`]: subcommands plus the ratatui menu

pub mod browser;
pub mod cli;
pub mod config;
pub mod domain;
pub mod parser;
pub mod registry;
pub mod scanner;

pub use domain::{Entry, EntryError, FileColor};
pub use registry::{ExportFormat, LinkRegistry, Statistics};
pub use scanner::{ScanOptions, Scanner};
