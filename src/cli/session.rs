//! Per-invocation session state
//!
//! A session resolves the effective configuration (config files plus CLI
//! overrides), runs the scan, and hands commands a ready registry. Skipped
//! files are reported as warnings here so every scanning command surfaces
//! them the same way.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::app::Cli;
use super::output::Output;
use crate::browser::Launcher;
use crate::config::Config;
use crate::registry::LinkRegistry;

/// Effective configuration and scanned registry for one command
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub registry: LinkRegistry,
}

impl Session {
    /// Loads config, applies CLI overrides, and scans the root
    pub fn open(cli: &Cli, output: &Output) -> Result<Self> {
        let root = cli.path.clone();
        let mut config = Config::load(&root)?;

        if cli.recursive {
            config.scan.recursive = true;
        }
        if cli.no_recursive {
            config.scan.recursive = false;
        }
        if let Some(browser) = &cli.browser {
            config.browser.command = Some(browser.clone());
        }
        if cli.no_color {
            config.display.colors = false;
        }

        let mut registry = LinkRegistry::new();
        let total = registry
            .scan(&root, &config.scan_options())
            .with_context(|| format!("failed to scan {}", root.display()))?;

        output.verbose_ctx(
            "scan",
            &format!("{total} links from {}", root.display()),
        );

        for skipped in registry.skipped() {
            output.warn(&format!(
                "skipping {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }

        Ok(Self {
            root,
            config,
            registry,
        })
    }

    /// Builds a launcher from the session's browser settings
    pub fn launcher(&self) -> Launcher {
        Launcher::new(
            self.config.browser.command.clone(),
            self.config.browser.open_delay_ms,
        )
    }
}
