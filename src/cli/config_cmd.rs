//! Configuration inspection and bootstrapping

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a commented dokk.toml template to the scan root
    Init,

    /// Print the configuration file locations
    Path,
}

pub fn run(cmd: ConfigCommands, root: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load(root)?;
            if output.is_json() {
                output.data(&config);
            } else {
                let rendered =
                    toml::to_string_pretty(&config).context("failed to render configuration")?;
                print!("{rendered}");
            }
        }

        ConfigCommands::Init => {
            let path = Config::local_config_path(root);
            if path.exists() {
                anyhow::bail!("configuration already exists: {}", path.display());
            }

            fs::write(&path, Config::template())
                .with_context(|| format!("failed to write {}", path.display()))?;
            output.success(&format!("Wrote configuration template to {}", path.display()));
        }

        ConfigCommands::Path => {
            let local = Config::local_config_path(root);
            let marker = |p: &Path| if p.is_file() { " (present)" } else { "" };

            println!("local:  {}{}", local.display(), marker(&local));
            match Config::global_config_path() {
                Some(global) => println!("global: {}{}", global.display(), marker(&global)),
                None => println!("global: unavailable (no home directory)"),
            }
        }
    }

    Ok(())
}
