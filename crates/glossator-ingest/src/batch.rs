use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use glossator_core::{BatchReport, DocumentOutcome, DocumentStatus, PdfBackend, ProgressEvent};
use glossator_parsing::{AbbreviationExtractor, source_name};

use crate::extract_document;

/// Extract abbreviations from every document in `paths`.
///
/// Up to `num_workers` documents are extracted at once, each on a blocking
/// task. A document that fails (unreadable file, backend error, or a panic
/// inside the backend) becomes a [`DocumentOutcome::Failed`] and the rest of
/// the batch carries on. Outcomes are returned in the order of `paths`.
pub async fn process_documents(
    paths: Vec<PathBuf>,
    backend: Arc<dyn PdfBackend>,
    extractor: Arc<AbbreviationExtractor>,
    num_workers: usize,
    progress: impl Fn(ProgressEvent) + Send + Sync + 'static,
) -> BatchReport {
    let total = paths.len();
    let names: Vec<String> = paths.iter().map(|p| source_name(p)).collect();
    let progress = Arc::new(progress);
    let semaphore = Arc::new(Semaphore::new(num_workers.max(1)));

    let mut join_set = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let backend = Arc::clone(&backend);
        let extractor = Arc::clone(&extractor);
        let progress = Arc::clone(&progress);
        let semaphore = Arc::clone(&semaphore);
        let name = names[index].clone();

        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();

            progress(ProgressEvent::Started {
                index,
                total,
                source_name: name.clone(),
            });

            let task = tokio::task::spawn_blocking(move || {
                extract_document(&path, backend.as_ref(), &extractor)
            });

            let outcome = match task.await {
                Ok(Ok(result)) => DocumentOutcome::Extracted(result),
                Ok(Err(e)) => {
                    tracing::warn!(source = %name, error = %e, "skipping document");
                    DocumentOutcome::Failed {
                        source_name: name.clone(),
                        error: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::warn!(source = %name, error = %e, "extraction task failed");
                    DocumentOutcome::Failed {
                        source_name: name.clone(),
                        error: format!("extraction task failed: {e}"),
                    }
                }
            };

            progress(ProgressEvent::Finished {
                index,
                total,
                source_name: name,
                status: DocumentStatus::from(&outcome),
            });

            (index, outcome)
        });
    }

    let mut slots: Vec<Option<DocumentOutcome>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => tracing::error!(error = %e, "document task aborted"),
        }
    }

    // A slot is only empty if its task itself died (e.g. the progress
    // callback panicked); report it rather than dropping the document.
    let outcomes = slots
        .into_iter()
        .zip(names)
        .map(|(slot, source_name)| {
            slot.unwrap_or(DocumentOutcome::Failed {
                source_name,
                error: "document task aborted".to_string(),
            })
        })
        .collect();

    BatchReport { outcomes }
}
