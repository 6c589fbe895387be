//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{config_cmd, export_cmd, links, menu, open_cmd};
use crate::registry::ExportFormat;

#[derive(Parser)]
#[command(name = "dokk")]
#[command(author, version, about = "Launch team documentation links from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to scan for link files
    #[arg(long, short = 'p', global = true, default_value = ".")]
    pub path: PathBuf,

    /// Scan subdirectories (overrides configuration)
    #[arg(long, short = 'r', global = true, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Do not scan subdirectories (overrides configuration)
    #[arg(long, global = true)]
    pub no_recursive: bool,

    /// Browser command used to open links (overrides configuration)
    #[arg(long, short = 'b', global = true)]
    pub browser: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format for messages and data
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all links
    List {
        /// Render as an export format instead of the numbered listing
        #[arg(long, value_name = "FORMAT")]
        export: Option<ExportFormat>,
    },

    /// Open links by their listed number, or all of them
    Open {
        /// 1-based link numbers
        #[arg(value_name = "INDEX", required_unless_present = "all")]
        indices: Vec<usize>,

        /// Open every link
        #[arg(long, short = 'a', conflicts_with = "indices")]
        all: bool,

        /// Skip the open-all confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Search links by description
    Search {
        /// Case-insensitive term matched against descriptions
        term: String,
    },

    /// Show statistics for the scanned links
    Stats,

    /// Re-validate every scanned link
    Validate,

    /// Export links in a given format
    Export {
        /// Output format: text, markdown, html, or json
        #[arg(id = "export_format", value_name = "FORMAT")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Inspect or create configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),

    /// Browse links in the interactive menu
    Menu,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("dokk starting");

    // Config inspection works without scanning
    let command = match cli.command.take().unwrap_or(Commands::Menu) {
        Commands::Config(cmd) => return config_cmd::run(cmd, &cli.path, &output),
        command => command,
    };

    let session = Session::open(&cli, &output)?;

    match command {
        Commands::List { export } => links::list(&session, &output, export)?,

        Commands::Open { indices, all, yes } => {
            open_cmd::run(&session, &output, &indices, all, yes)?
        }

        Commands::Search { term } => links::search(&session, &output, &term)?,

        Commands::Stats => links::stats(&session, &output)?,

        Commands::Validate => links::validate(&session, &output)?,

        Commands::Export {
            format,
            output: file,
        } => export_cmd::run(&session, &output, format, file.as_deref())?,

        Commands::Config(_) => unreachable!("handled before scanning"),

        Commands::Menu => menu::run(session, &output)?,
    }

    output.verbose("command completed");
    Ok(())
}
