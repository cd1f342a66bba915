//! Integration tests for [`process_documents`].
//!
//! Documents are fake `.pdf` paths served by an in-memory backend, so no
//! real PDF files are opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glossator_core::BackendError;
use glossator_ingest::{DocumentOutcome, DocumentStatus, PdfBackend, ProgressEvent, process_documents};
use glossator_parsing::AbbreviationExtractor;

/// Serves canned text per file name; unknown names fail to open.
struct MapBackend {
    texts: HashMap<String, String>,
    delay: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MapBackend {
    fn new() -> Self {
        Self {
            texts: HashMap::new(),
            delay: HashMap::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn with(mut self, name: &str, text: &str) -> Self {
        self.texts.insert(name.to_string(), text.to_string());
        self
    }

    fn slow(mut self, name: &str, millis: u64) -> Self {
        self.delay.insert(name.to_string(), Duration::from_millis(millis));
        self
    }
}

impl PdfBackend for MapBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if let Some(d) = self.delay.get(&name) {
            std::thread::sleep(*d);
        }
        let result = match name.as_str() {
            "panics.pdf" => panic!("corrupt xref table"),
            _ => self
                .texts
                .get(&name)
                .cloned()
                .ok_or_else(|| BackendError::OpenError(format!("cannot open {name}"))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from("/virtual").join(n)).collect()
}

fn names(outcomes: &[DocumentOutcome]) -> Vec<&str> {
    outcomes.iter().map(|o| o.source_name()).collect()
}

#[tokio::test]
async fn outcomes_follow_input_order() {
    let backend = MapBackend::new()
        .with("a.pdf", "Abbreviations\nAPI - Application Programming Interface\n")
        .with("b.pdf", "Acronyms\nGPU - Graphics Processing Unit\n")
        .with("c.pdf", "Glossary of Terms\nRAM - Random Access Memory\n")
        .slow("a.pdf", 120)
        .slow("b.pdf", 60);

    let report = process_documents(
        paths(&["a.pdf", "b.pdf", "c.pdf"]),
        Arc::new(backend),
        Arc::new(AbbreviationExtractor::new()),
        3,
        |_| {},
    )
    .await;

    assert_eq!(names(&report.outcomes), vec!["a.pdf", "b.pdf", "c.pdf"]);
    let docs = report.documents();
    let terms: Vec<&str> = docs
        .iter()
        .map(|d| d.abbreviations[0].term.as_str())
        .collect();
    assert_eq!(terms, vec!["API", "GPU", "RAM"]);
}

#[tokio::test]
async fn failures_are_isolated() {
    let backend = MapBackend::new()
        .with("good.pdf", "List of Abbreviations\nCPU - Central Processing Unit\n")
        .with("plain.pdf", "Introduction\nNothing to see here.\n");

    let report = process_documents(
        paths(&["missing.pdf", "good.pdf", "panics.pdf", "plain.pdf"]),
        Arc::new(backend),
        Arc::new(AbbreviationExtractor::new()),
        2,
        |_| {},
    )
    .await;

    assert_eq!(report.outcomes.len(), 4);
    assert!(matches!(&report.outcomes[0], DocumentOutcome::Failed { error, .. } if error.contains("cannot open")));
    assert!(matches!(&report.outcomes[1], DocumentOutcome::Extracted(_)));
    assert!(matches!(&report.outcomes[2], DocumentOutcome::Failed { .. }));
    assert!(matches!(&report.outcomes[3], DocumentOutcome::Extracted(_)));

    let stats = report.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.found, 1);
    assert_eq!(stats.no_section, 1);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.abbreviations, 1);

    // Only documents with entries make it into the report.
    let docs = report.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].source_name, "good.pdf");
}

#[tokio::test]
async fn worker_limit_is_respected() {
    let mut backend = MapBackend::new();
    let all: Vec<String> = (0..8).map(|i| format!("doc{i}.pdf")).collect();
    for name in &all {
        backend = backend
            .with(name, "Acronyms\nX1 - Something\n")
            .slow(name, 40);
    }
    let backend = Arc::new(backend);

    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let report = process_documents(
        paths(&refs),
        backend.clone(),
        Arc::new(AbbreviationExtractor::new()),
        2,
        |_| {},
    )
    .await;

    assert_eq!(report.stats().found, 8);
    assert!(backend.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn zero_workers_still_progresses() {
    let backend = MapBackend::new().with("only.pdf", "Acronyms\nOK - Okay\n");
    let report = process_documents(
        paths(&["only.pdf"]),
        Arc::new(backend),
        Arc::new(AbbreviationExtractor::new()),
        0,
        |_| {},
    )
    .await;
    assert_eq!(report.stats().found, 1);
}

#[tokio::test]
async fn progress_reports_every_document() {
    let backend = MapBackend::new()
        .with("one.pdf", "Acronyms\nAI - Artificial Intelligence\nML - Machine Learning\n")
        .with("two.pdf", "Abbreviations\n");

    let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    process_documents(
        paths(&["one.pdf", "two.pdf", "three.pdf"]),
        Arc::new(backend),
        Arc::new(AbbreviationExtractor::new()),
        2,
        move |e| sink.lock().unwrap().push(e),
    )
    .await;

    let events = events.lock().unwrap();
    let started = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::Started { total: 3, .. }))
        .count();
    assert_eq!(started, 3);

    let mut finished: Vec<(String, DocumentStatus)> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Finished {
                source_name,
                status,
                ..
            } => Some((source_name.clone(), status.clone())),
            _ => None,
        })
        .collect();
    finished.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(finished.len(), 3);
    assert_eq!(finished[0], ("one.pdf".to_string(), DocumentStatus::Found(2)));
    assert!(matches!(&finished[1], (n, DocumentStatus::Failed(_)) if n == "three.pdf"));
    assert_eq!(
        finished[2],
        ("two.pdf".to_string(), DocumentStatus::NoEntriesParsed)
    );
}
