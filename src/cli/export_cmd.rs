//! Exporting the snapshot to a file or stdout

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use super::session::Session;
use crate::registry::ExportFormat;

/// `dokk export <FORMAT> [--output FILE]`
pub fn run(
    session: &Session,
    output: &Output,
    format: ExportFormat,
    file: Option<&Path>,
) -> Result<()> {
    let content = session.registry.export_as(format)?;

    match file {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            output.success(&format!(
                "Exported {} links to {}",
                session.registry.len(),
                path.display()
            ));
        }
        None => println!("{content}"),
    }

    Ok(())
}
