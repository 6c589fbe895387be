//! Snapshot export
//!
//! Serializes the registry snapshot in one of four formats. Output order is
//! always file-traversal order, then per-file line order, so exports are
//! deterministic for a given scan.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::LinkRegistry;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Html,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ExportFormat::Text),
            "markdown" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub(super) fn render(registry: &LinkRegistry, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(render_text(registry)),
        ExportFormat::Markdown => Ok(render_markdown(registry)),
        ExportFormat::Html => Ok(render_html(registry)),
        ExportFormat::Json => render_json(registry),
    }
}

fn render_text(registry: &LinkRegistry) -> String {
    let mut lines = vec![
        "Documentation Links".to_string(),
        "=".repeat(50),
        String::new(),
    ];

    for (path, entries) in registry.entries_by_file() {
        lines.push(format!("File: {}", path.display()));
        lines.push("-".repeat(40));
        for (i, entry) in entries.iter().enumerate() {
            lines.push(format!("{:2}. {}", i + 1, entry.description()));
            lines.push(format!("    {}", entry.url()));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_markdown(registry: &LinkRegistry) -> String {
    let mut lines = vec!["# Documentation Links".to_string(), String::new()];

    for (path, entries) in registry.entries_by_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        lines.push(format!("## {name}"));
        lines.push(String::new());
        for entry in entries {
            lines.push(format!("- [{}]({})", entry.description(), entry.url()));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_html(registry: &LinkRegistry) -> String {
    let mut html = vec![
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head>".to_string(),
        "<title>Documentation Links</title>".to_string(),
        "</head>".to_string(),
        "<body>".to_string(),
        "<h1>Documentation Links</h1>".to_string(),
    ];

    for (path, entries) in registry.entries_by_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        html.push(format!("<h2>{}</h2>", html_escape::encode_text(&name)));
        html.push("<ul>".to_string());
        for entry in entries {
            html.push(format!(
                "<li><a href=\"{}\">{}</a></li>",
                html_escape::encode_double_quoted_attribute(entry.url()),
                html_escape::encode_text(entry.description()),
            ));
        }
        html.push("</ul>".to_string());
    }

    html.push("</body>".to_string());
    html.push("</html>".to_string());
    html.join("\n")
}

#[derive(Serialize)]
struct JsonExport {
    scan_info: JsonScanInfo,
    files: Vec<JsonFile>,
}

#[derive(Serialize)]
struct JsonScanInfo {
    scan_path: Option<String>,
    total_entries: usize,
    total_files: usize,
}

#[derive(Serialize)]
struct JsonFile {
    file_path: String,
    entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    description: String,
    url: String,
}

fn render_json(registry: &LinkRegistry) -> Result<String, ExportError> {
    let export = JsonExport {
        scan_info: JsonScanInfo {
            scan_path: registry.last_scan_path().map(|p| p.display().to_string()),
            total_entries: registry.len(),
            total_files: registry.entries_by_file().len(),
        },
        files: registry
            .entries_by_file()
            .iter()
            .map(|(path, entries)| JsonFile {
                file_path: path.display().to_string(),
                entries: entries
                    .iter()
                    .map(|e| JsonEntry {
                        description: e.description().to_string(),
                        url: e.url().to_string(),
                    })
                    .collect(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&export)?)
}
