use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, PdfBackend};

/// A single term/definition pair parsed from one line of a glossary section.
///
/// Both fields are trimmed and non-empty. Duplicates are legal and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abbreviation {
    pub term: String,
    pub definition: String,
}

impl Abbreviation {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// All abbreviations extracted from one source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub source_name: String,
    pub abbreviations: Vec<Abbreviation>,
}

/// How far extraction got for a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// A section was located and at least one entry parsed.
    Found,
    /// None of the configured section headers occur in the text.
    NoSectionFound,
    /// A section was located but no line parsed as an entry.
    NoEntriesParsed,
}

/// Result of extracting abbreviations from one document's text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub document: ProcessedDocument,
    /// The configured header literal that located the section, if any.
    pub matched_header: Option<String>,
}

impl ExtractionResult {
    pub fn status(&self) -> ExtractionStatus {
        match (&self.matched_header, self.document.abbreviations.is_empty()) {
            (None, _) => ExtractionStatus::NoSectionFound,
            (Some(_), true) => ExtractionStatus::NoEntriesParsed,
            (Some(_), false) => ExtractionStatus::Found,
        }
    }
}

/// Per-document outcome of a batch run. Failures are values, not panics or
/// early returns, so one bad file never aborts the batch.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Extracted(ExtractionResult),
    Failed { source_name: String, error: String },
}

impl DocumentOutcome {
    pub fn source_name(&self) -> &str {
        match self {
            DocumentOutcome::Extracted(r) => &r.document.source_name,
            DocumentOutcome::Failed { source_name, .. } => source_name,
        }
    }

    /// The processed document, if it contributes at least one abbreviation.
    pub fn document(&self) -> Option<&ProcessedDocument> {
        match self {
            DocumentOutcome::Extracted(r) if !r.document.abbreviations.is_empty() => {
                Some(&r.document)
            }
            _ => None,
        }
    }
}

/// Summary counts for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub found: usize,
    pub no_section: usize,
    pub no_entries: usize,
    pub failed: usize,
    pub abbreviations: usize,
}

/// Outcomes of a batch run, in the order the documents were submitted.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Documents that contribute entries to the report, in submission order.
    pub fn documents(&self) -> Vec<ProcessedDocument> {
        self.outcomes
            .iter()
            .filter_map(|o| o.document().cloned())
            .collect()
    }

    pub fn stats(&self) -> BatchStats {
        let mut stats = BatchStats {
            total: self.outcomes.len(),
            ..BatchStats::default()
        };
        for outcome in &self.outcomes {
            match outcome {
                DocumentOutcome::Failed { .. } => stats.failed += 1,
                DocumentOutcome::Extracted(r) => match r.status() {
                    ExtractionStatus::Found => {
                        stats.found += 1;
                        stats.abbreviations += r.document.abbreviations.len();
                    }
                    ExtractionStatus::NoSectionFound => stats.no_section += 1,
                    ExtractionStatus::NoEntriesParsed => stats.no_entries += 1,
                },
            }
        }
        stats
    }
}

/// Terminal status of one document, carried by [`ProgressEvent::Finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Found(usize),
    NoSectionFound,
    NoEntriesParsed,
    Failed(String),
}

impl From<&DocumentOutcome> for DocumentStatus {
    fn from(outcome: &DocumentOutcome) -> Self {
        match outcome {
            DocumentOutcome::Failed { error, .. } => DocumentStatus::Failed(error.clone()),
            DocumentOutcome::Extracted(r) => match r.status() {
                ExtractionStatus::Found => DocumentStatus::Found(r.document.abbreviations.len()),
                ExtractionStatus::NoSectionFound => DocumentStatus::NoSectionFound,
                ExtractionStatus::NoEntriesParsed => DocumentStatus::NoEntriesParsed,
            },
        }
    }
}

/// Progress events emitted during batch processing.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        index: usize,
        total: usize,
        source_name: String,
    },
    Finished {
        index: usize,
        total: usize,
        source_name: String,
        status: DocumentStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(name: &str, header: Option<&str>, entries: &[(&str, &str)]) -> DocumentOutcome {
        DocumentOutcome::Extracted(ExtractionResult {
            document: ProcessedDocument {
                source_name: name.to_string(),
                abbreviations: entries
                    .iter()
                    .map(|(t, d)| Abbreviation::new(*t, *d))
                    .collect(),
            },
            matched_header: header.map(str::to_string),
        })
    }

    #[test]
    fn test_status_classification() {
        let DocumentOutcome::Extracted(none) = extracted("a.pdf", None, &[]) else {
            unreachable!()
        };
        assert_eq!(none.status(), ExtractionStatus::NoSectionFound);

        let DocumentOutcome::Extracted(empty) = extracted("b.pdf", Some("acronyms"), &[]) else {
            unreachable!()
        };
        assert_eq!(empty.status(), ExtractionStatus::NoEntriesParsed);

        let DocumentOutcome::Extracted(found) =
            extracted("c.pdf", Some("acronyms"), &[("CPU", "Central Processing Unit")])
        else {
            unreachable!()
        };
        assert_eq!(found.status(), ExtractionStatus::Found);
    }

    #[test]
    fn test_batch_documents_excludes_empty_and_failed() {
        let report = BatchReport {
            outcomes: vec![
                extracted("a.pdf", Some("abbreviations"), &[("GDP", "Gross Domestic Product")]),
                extracted("b.pdf", None, &[]),
                DocumentOutcome::Failed {
                    source_name: "c.pdf".into(),
                    error: "corrupt".into(),
                },
                extracted("d.pdf", Some("acronyms"), &[]),
                extracted("e.pdf", Some("acronyms"), &[("A", "x"), ("B", "y")]),
            ],
        };

        let names: Vec<_> = report
            .documents()
            .into_iter()
            .map(|d| d.source_name)
            .collect();
        assert_eq!(names, vec!["a.pdf", "e.pdf"]);

        let stats = report.stats();
        assert_eq!(
            stats,
            BatchStats {
                total: 5,
                found: 2,
                no_section: 1,
                no_entries: 1,
                failed: 1,
                abbreviations: 3,
            }
        );
    }

    #[test]
    fn test_document_status_from_outcome() {
        let failed = DocumentOutcome::Failed {
            source_name: "x.pdf".into(),
            error: "boom".into(),
        };
        assert_eq!(failed.source_name(), "x.pdf");
        assert_eq!(
            DocumentStatus::from(&failed),
            DocumentStatus::Failed("boom".into())
        );

        let ok = extracted("y.pdf", Some("acronyms"), &[("API", "Application Programming Interface")]);
        assert_eq!(DocumentStatus::from(&ok), DocumentStatus::Found(1));
    }
}
