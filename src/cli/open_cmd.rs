//! Opening links in the browser

use std::io::{self, Write};

use anyhow::Result;

use super::output::Output;
use super::session::Session;

/// `dokk open <INDEX>...` / `dokk open --all`
pub fn run(
    session: &Session,
    output: &Output,
    indices: &[usize],
    all: bool,
    yes: bool,
) -> Result<()> {
    if session.registry.is_empty() {
        output.warn("no links to open");
        return Ok(());
    }

    if all {
        open_all(session, output, yes)
    } else {
        open_indices(session, output, indices)
    }
}

fn open_all(session: &Session, output: &Output, yes: bool) -> Result<()> {
    let mut entries: Vec<_> = session.registry.all_entries().iter().collect();

    let cap = session.config.browser.max_open_all;
    if entries.len() > cap {
        output.warn(&format!(
            "{} links found, opening only the first {cap}",
            entries.len()
        ));
        entries.truncate(cap);
    }

    if session.config.display.confirm_open_all && !yes {
        let prompt = format!("Open {} links in the browser?", entries.len());
        if !confirm(&prompt)? {
            output.success("Cancelled");
            return Ok(());
        }
    }

    let launcher = session.launcher();
    let report = launcher.open_all(entries.iter().map(|e| e.url()));

    for (url, reason) in &report.failures {
        output.warn(&format!("failed to open {url}: {reason}"));
    }
    output.success(&format!(
        "Opened {} of {} links",
        report.opened,
        report.attempted()
    ));

    if report.opened == 0 {
        anyhow::bail!("no links could be opened");
    }
    Ok(())
}

fn open_indices(session: &Session, output: &Output, indices: &[usize]) -> Result<()> {
    let launcher = session.launcher();
    let mut failed = 0;

    for &index in indices {
        match session.registry.entry_at(index) {
            Some(entry) => {
                output.verbose_ctx("open", entry.url());
                match launcher.open_url(entry.url()) {
                    Ok(()) => output.success(&format!("Opened: {}", entry.description())),
                    Err(err) => {
                        output.error(&format!("{err:#}"));
                        failed += 1;
                    }
                }
            }
            None => {
                output.error(&format!(
                    "no link with number {index} (valid range: 1-{})",
                    session.registry.len()
                ));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} links could not be opened", indices.len());
    }
    Ok(())
}

/// Asks a yes/no question on stdin; anything but y/yes declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
