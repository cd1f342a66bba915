use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod entry;
pub mod extractor;
pub mod section;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use entry::{
    EntryStrategy, ParsedEntry, parse_entries, parse_entries_detailed, parse_entries_with_config,
};
pub use extractor::{AbbreviationExtractor, source_name};
pub use section::{
    DEFAULT_NEXT_SECTION_MARKERS, DEFAULT_SECTION_HEADERS, SectionLiteral, SectionSpan,
    find_abbreviation_section, find_abbreviation_section_with_config, locate_section,
    locate_section_with_config,
};
// Re-export domain types from core (canonical definitions live there)
pub use glossator_core::{
    Abbreviation, BackendError, ExtractionResult, ExtractionStatus, PdfBackend, ProcessedDocument,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] glossator_core::BackendError),
}

/// Extract abbreviations from a PDF file using the given backend for text extraction.
///
/// Pipeline:
/// 1. Extract text from the PDF via `backend`
/// 2. Locate the abbreviation/glossary section (leftmost header wins)
/// 3. Bound it at the earliest following next-section marker
/// 4. Parse each line after the header into a term/definition pair
pub fn extract_abbreviations(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractionResult, ParsingError> {
    AbbreviationExtractor::new().extract_via_backend(pdf_path, backend)
}
