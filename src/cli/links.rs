//! Listing, searching, statistics, and validation commands

use anyhow::Result;

use super::output::Output;
use super::render;
use super::session::Session;
use crate::domain::Entry;
use crate::registry::ExportFormat;

/// `dokk list` - numbered listing or raw export
pub fn list(session: &Session, output: &Output, export: Option<ExportFormat>) -> Result<()> {
    if let Some(format) = export {
        println!("{}", session.registry.export_as(format)?);
        return Ok(());
    }

    if session.registry.is_empty() {
        output.success("No links found");
        return Ok(());
    }

    if output.is_json() {
        output.data(&session.registry.all_entries());
        return Ok(());
    }

    print_listing(session);
    Ok(())
}

/// `dokk search <TERM>` - listing restricted to matching descriptions
pub fn search(session: &Session, output: &Output, term: &str) -> Result<()> {
    if term.trim().is_empty() {
        output.warn("empty search term");
        return Ok(());
    }

    let hits = session.registry.filter(term);

    if output.is_json() {
        output.data(&hits);
        return Ok(());
    }

    if hits.is_empty() {
        output.warn(&format!("no links match '{term}'"));
        return Ok(());
    }

    println!("Results for '{term}':");
    output.blank();
    print_entries(session, hits.into_iter());
    Ok(())
}

/// `dokk stats` - aggregate counts
pub fn stats(session: &Session, output: &Output) -> Result<()> {
    let stats = session.registry.statistics();

    if output.is_json() {
        output.data(&stats);
        return Ok(());
    }

    println!("Links:   {}", stats.total_links);
    println!("Files:   {}", stats.total_files);
    println!("Domains: {}", stats.unique_domains);

    if output.is_verbose() {
        output.blank();
        for (path, entries) in session.registry.entries_by_file() {
            println!("  {}: {} links", path.display(), entries.len());
        }
    }

    Ok(())
}

/// `dokk validate` - defensive re-check of every scanned link
pub fn validate(session: &Session, output: &Output) -> Result<()> {
    let failures = session.registry.validate_all();

    if failures.is_empty() {
        output.success("All links are valid");
        return Ok(());
    }

    if output.is_json() {
        let items: Vec<_> = failures
            .iter()
            .map(|(entry, reason)| {
                serde_json::json!({
                    "description": entry.description(),
                    "url": entry.url(),
                    "file": entry.source_file().display().to_string(),
                    "reason": reason,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (entry, reason) in &failures {
            output.warn(&format!(
                "{}: {} ({})",
                entry.description(),
                reason,
                entry.source_file().display()
            ));
        }
    }

    anyhow::bail!("{} invalid links found", failures.len())
}

/// Prints the full listing, grouped by file when configured
fn print_listing(session: &Session) {
    let display = &session.config.display;

    if !display.group_by_file {
        print_entries(session, session.registry.all_entries().iter());
        return;
    }

    let mut number = 0;
    for (path, entries) in session.registry.entries_by_file() {
        let heading = format!("{} ({} links)", path.display(), entries.len());
        match session.registry.color_of(path) {
            Some(color) if display.colors => {
                use crossterm::style::Stylize;
                println!("{}", heading.with(render::terminal_color(color)));
            }
            _ => println!("{heading}"),
        }

        for entry in entries {
            number += 1;
            let (line, url) =
                render::entry_lines(number, entry, session.registry.color_of(path), display);
            println!("{line}");
            println!("{url}");
        }
        println!();
    }
}

/// Prints a run of entries numbered from 1
fn print_entries<'a, I>(session: &Session, entries: I)
where
    I: Iterator<Item = &'a Entry>,
{
    let display = &session.config.display;

    for (i, entry) in entries.enumerate() {
        let color = session.registry.color_of(entry.source_file());
        let (line, url) = render::entry_lines(i + 1, entry, color, display);
        println!("{line}");
        println!("{url}");
    }
}
