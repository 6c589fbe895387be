//! Configuration handling for dokk
//!
//! Configuration is stored in `dokk.toml` at the scan root (per-project) or
//! in the user config directory (global); the local file takes precedence.
//! Settings never live in process-wide state: callers read a [`Config`] and
//! hand the relevant values into scanner, registry, and launcher calls.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scanner::ScanOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Scanning behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Descend into subdirectories
    pub recursive: bool,

    /// Depth cap for recursive scans
    pub max_depth: Option<usize>,

    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: None,
            excluded_dirs: vec![".git".to_string()],
        }
    }
}

/// List and menu rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color entries by source file
    pub colors: bool,

    /// Emit OSC 8 hyperlinks in plain listings
    pub hyperlinks: bool,

    /// Group listings by source file
    pub group_by_file: bool,

    /// Truncate descriptions beyond this many characters
    pub max_description_length: usize,

    /// Ask before opening every link at once
    pub confirm_open_all: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            hyperlinks: true,
            group_by_file: true,
            max_description_length: 80,
            confirm_open_all: true,
        }
    }
}

/// Browser launching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Browser command to launch with (system default when unset)
    pub command: Option<String>,

    /// Delay between successive launches, in milliseconds
    pub open_delay_ms: u64,

    /// Upper bound on links opened by a single open-all
    pub max_open_all: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            command: None,
            open_delay_ms: 500,
            max_open_all: 10,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub display: DisplayConfig,
    pub browser: BrowserConfig,
}

impl Config {
    /// Loads configuration for a scan root.
    ///
    /// A `dokk.toml` in the root wins over the global config file; with
    /// neither present, defaults apply.
    pub fn load(root: &Path) -> Result<Self> {
        let local = Self::local_config_path(root);
        if local.is_file() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.is_file() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the per-root config file path
    pub fn local_config_path(root: &Path) -> PathBuf {
        root.join("dokk.toml")
    }

    /// Returns the global config file path, if a home directory exists
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "dokk", "dokk").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Translates the scan section into scanner options
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.scan.recursive,
            max_depth: self.scan.max_depth,
            excluded_dirs: self.scan.excluded_dirs.clone(),
        }
    }

    /// A commented configuration template for `dokk config init`
    pub fn template() -> &'static str {
        r#"# dokk configuration
# Place this file as dokk.toml in the directory you scan, or as
# config.toml in your user config directory for a global default.

[scan]
# Descend into subdirectories
recursive = true
# Depth cap for recursive scans (unset = unlimited)
# max_depth = 10
# Directory names never descended into
excluded_dirs = [".git", "node_modules", "target"]

[display]
# Color entries by source file
colors = true
# Emit clickable OSC 8 hyperlinks in listings
hyperlinks = true
# Group listings by source file
group_by_file = true
# Truncate descriptions beyond this many characters
max_description_length = 80
# Ask before opening every link at once
confirm_open_all = true

[browser]
# Browser command to launch with (unset = system default)
# command = "firefox"
# Delay between successive launches, in milliseconds
open_delay_ms = 500
# Upper bound on links opened by a single open --all
max_open_all = 10
"#
    }
}
