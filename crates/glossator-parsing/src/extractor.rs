use std::path::Path;

use glossator_core::{ExtractionResult, PdfBackend, ProcessedDocument};

use crate::ParsingError;
use crate::config::ParsingConfig;
use crate::entry::{ParsedEntry, parse_entries_detailed};
use crate::section::{SectionSpan, locate_section_with_config};

/// Configurable abbreviation extractor.
///
/// Holds a [`ParsingConfig`] and exposes the locate + parse pipeline over
/// already-extracted text or over a PDF through a [`PdfBackend`].
#[derive(Debug, Clone, Default)]
pub struct AbbreviationExtractor {
    config: ParsingConfig,
}

impl AbbreviationExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Locate the glossary section in `text`.
    pub fn locate(&self, text: &str) -> Option<SectionSpan> {
        locate_section_with_config(text, &self.config)
    }

    /// Parse section text into entries, keeping strategy and line details.
    pub fn parse_detailed(&self, section_text: &str) -> Vec<ParsedEntry> {
        parse_entries_detailed(section_text, &self.config)
    }

    /// Run section location and entry parsing over one document's text.
    ///
    /// "No section" and "no entries" are reported through
    /// [`ExtractionResult::status`], never as errors.
    pub fn extract_from_text(&self, source_name: &str, text: &str) -> ExtractionResult {
        let Some(span) = self.locate(text) else {
            tracing::info!(source = source_name, "no abbreviation section found");
            return ExtractionResult {
                document: ProcessedDocument {
                    source_name: source_name.to_string(),
                    abbreviations: Vec::new(),
                },
                matched_header: None,
            };
        };

        let abbreviations: Vec<_> = self
            .parse_detailed(span.section_text(text))
            .into_iter()
            .map(|e| e.abbreviation)
            .collect();

        if abbreviations.is_empty() {
            tracing::info!(
                source = source_name,
                header = %span.matched_header,
                "section located but no entries parsed"
            );
        } else {
            tracing::debug!(
                source = source_name,
                header = %span.matched_header,
                start = span.start,
                end = span.end,
                entries = abbreviations.len(),
                "extracted abbreviations"
            );
        }

        ExtractionResult {
            document: ProcessedDocument {
                source_name: source_name.to_string(),
                abbreviations,
            },
            matched_header: Some(span.matched_header),
        }
    }

    /// Extract text from a PDF via `backend`, then locate and parse.
    ///
    /// The file name (not the full path) becomes the document's source name.
    pub fn extract_via_backend(
        &self,
        pdf_path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<ExtractionResult, ParsingError> {
        let text = backend.extract_text(pdf_path)?;
        Ok(self.extract_from_text(&source_name(pdf_path), &text))
    }
}

/// Display name for a document path: its file name, or the whole path when
/// there is none.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
