use std::path::{Path, PathBuf};

/// Create `dir` (and parents) if it does not exist yet.
///
/// Returns `true` when the directory was just created, i.e. there is nothing
/// in it to process.
pub fn ensure_input_dir(dir: &Path) -> std::io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    tracing::info!(path = %dir.display(), "created input directory");
    Ok(true)
}

/// Returns true if the file name has a supported extension (`.pdf` or `.txt`).
pub fn is_supported_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf") || e.eq_ignore_ascii_case("txt"))
}

/// List the documents directly inside `dir`, sorted by file name.
///
/// Not recursive. Hidden files (leading `.`) and anything that is not a
/// regular file with a supported extension are skipped.
pub fn discover_documents(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !entry.file_type()?.is_file() || !is_supported_document(&path) {
            continue;
        }
        paths.push(path);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), count = paths.len(), "discovered documents");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_input_dir_creates_once() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("pdfs").join("nested");

        assert!(ensure_input_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_input_dir(&dir).unwrap());
    }

    #[test]
    fn test_is_supported_document() {
        assert!(is_supported_document(Path::new("a.pdf")));
        assert!(is_supported_document(Path::new("B.PDF")));
        assert!(is_supported_document(Path::new("notes.txt")));
        assert!(!is_supported_document(Path::new("archive.zip")));
        assert!(!is_supported_document(Path::new("README")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path();
        for name in ["zeta.pdf", "alpha.txt", "Mid.PDF", ".hidden.pdf", "image.png"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.join("folder.pdf")).unwrap();

        let names: Vec<String> = discover_documents(dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Mid.PDF", "alpha.txt", "zeta.pdf"]);
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover_documents(&root.path().join("missing")).is_err());
    }
}
