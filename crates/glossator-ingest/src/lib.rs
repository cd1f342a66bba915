use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use glossator_parsing::{AbbreviationExtractor, ParsingError, source_name};

pub mod batch;
pub mod discover;

// Re-export domain types for convenience
pub use glossator_core::{
    BatchReport, BatchStats, DocumentOutcome, DocumentStatus, ExtractionResult, PdfBackend,
    ProgressEvent,
};
pub use batch::process_documents;
pub use discover::{discover_documents, ensure_input_dir, is_supported_document};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("text extraction failed: {0}")]
    Parsing(#[from] ParsingError),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the full text of a PDF or a pre-extracted text file.
///
/// Dispatches on file extension:
/// - `.txt` → read as (lossy) UTF-8 text
/// - anything else → text extraction through `backend`
pub fn load_text(path: &Path, backend: &dyn PdfBackend) -> Result<String, IngestError> {
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    if is_txt {
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    Ok(backend.extract_text(path).map_err(ParsingError::from)?)
}

/// Extract abbreviations from a PDF or a pre-extracted text file.
pub fn extract_document(
    path: &Path,
    backend: &dyn PdfBackend,
    extractor: &AbbreviationExtractor,
) -> Result<ExtractionResult, IngestError> {
    let text = load_text(path, backend)?;
    Ok(extractor.extract_from_text(&source_name(path), &text))
}

/// The PDF backend compiled into this build.
#[cfg(feature = "pdf")]
pub fn default_backend() -> Arc<dyn PdfBackend> {
    Arc::new(glossator_pdf_mupdf::MupdfBackend::default())
}

/// The PDF backend compiled into this build.
#[cfg(not(feature = "pdf"))]
pub fn default_backend() -> Arc<dyn PdfBackend> {
    Arc::new(NoPdfSupport)
}

#[cfg(not(feature = "pdf"))]
struct NoPdfSupport;

#[cfg(not(feature = "pdf"))]
impl PdfBackend for NoPdfSupport {
    fn extract_text(&self, _path: &Path) -> Result<String, glossator_core::BackendError> {
        Err(glossator_core::BackendError::OpenError(
            "PDF support not compiled in (enable the `pdf` feature of glossator-ingest)".into(),
        ))
    }
}
