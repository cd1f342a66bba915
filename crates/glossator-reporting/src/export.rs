use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use glossator_core::ProcessedDocument;

use crate::types::{ExportFormat, ReportMode, UnifiedEntry};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Merge entries with identical terms across documents.
///
/// The first definition seen wins; later documents only add their name to
/// `sources`. The result is sorted by term (plain byte order, so `"API"`
/// sorts before `"Api"` and digits before letters).
pub fn unify(documents: &[ProcessedDocument]) -> Vec<UnifiedEntry> {
    let mut merged: BTreeMap<&str, UnifiedEntry> = BTreeMap::new();

    for doc in documents {
        for abbr in &doc.abbreviations {
            let entry = merged
                .entry(abbr.term.as_str())
                .or_insert_with(|| UnifiedEntry {
                    term: abbr.term.clone(),
                    definition: abbr.definition.clone(),
                    sources: Vec::new(),
                });
            if !entry.sources.iter().any(|s| s == &doc.source_name) {
                entry.sources.push(doc.source_name.clone());
            }
        }
    }

    merged.into_values().collect()
}

/// Render a report for `documents` without touching the filesystem.
///
/// Output depends only on the input, so the same documents always produce
/// byte-identical reports.
pub fn render_report(
    documents: &[ProcessedDocument],
    mode: ReportMode,
    format: ExportFormat,
) -> Result<String, ReportError> {
    let content = match (format, mode) {
        (ExportFormat::Markdown, ReportMode::Grouped) => grouped_markdown(documents),
        (ExportFormat::Markdown, ReportMode::Unified) => unified_markdown(&unify(documents)),
        (ExportFormat::Json, ReportMode::Grouped) => grouped_json(documents)?,
        (ExportFormat::Json, ReportMode::Unified) => {
            let mut json = serde_json::to_string_pretty(&unify(documents))?;
            json.push('\n');
            json
        }
    };
    Ok(content)
}

/// Render and write a report to `path`, creating parent directories.
pub fn write_report(
    documents: &[ProcessedDocument],
    mode: ReportMode,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ReportError> {
    let content = render_report(documents, mode, format)?;

    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)?;

    tracing::info!(
        path = %path.display(),
        %mode,
        %format,
        documents = documents.len(),
        "report written"
    );
    Ok(())
}

fn grouped_markdown(documents: &[ProcessedDocument]) -> String {
    let mut out = String::from("# Extracted Abbreviations\n");

    for doc in documents.iter().filter(|d| !d.abbreviations.is_empty()) {
        out.push_str(&format!("\n## From: {}\n\n", doc.source_name));
        for abbr in &doc.abbreviations {
            out.push_str(&format!("- **{}**: {}\n", abbr.term, abbr.definition));
        }
    }
    out
}

fn unified_markdown(entries: &[UnifiedEntry]) -> String {
    let mut out = String::from("# Unified Abbreviations List\n");

    if !entries.is_empty() {
        out.push('\n');
    }
    for entry in entries {
        out.push_str(&format!(
            "- **{}**: {} (Source: {})\n",
            entry.term,
            entry.definition,
            entry.sources.join(", ")
        ));
    }
    out
}

fn grouped_json(documents: &[ProcessedDocument]) -> Result<String, serde_json::Error> {
    let non_empty: Vec<&ProcessedDocument> = documents
        .iter()
        .filter(|d| !d.abbreviations.is_empty())
        .collect();
    let mut json = serde_json::to_string_pretty(&non_empty)?;
    json.push('\n');
    Ok(json)
}
