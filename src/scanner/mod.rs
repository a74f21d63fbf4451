use crate::error::{CuAnalyzerError, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub file_name: String,
}

const DOCUMENT_EXTENSIONS: &[&str] = &["html", "htm"];

fn is_document_extension(ext: &str) -> bool {
    DOCUMENT_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// List NOSS HTML documents in a folder, sorted by file name
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<DocumentFile>> {
    if !folder.is_dir() {
        return Err(CuAnalyzerError::FolderNotFound(folder.display().to_string()));
    }

    let mut walker = WalkDir::new(folder);
    if !recursive {
        walker = walker.max_depth(1); // 直下のみ
    }

    let mut documents = Vec::new();
    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .map(|ext| is_document_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if matches {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            documents.push(DocumentFile {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    Ok(documents)
}

/// Resolve the input of `analyze`/`run`: a single file or a folder of HTML files
pub fn collect_inputs(input: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.exists() {
        return Err(CuAnalyzerError::FileNotFound(input.display().to_string()));
    }

    let documents = scan_folder(input, recursive)?;
    if documents.is_empty() {
        return Err(CuAnalyzerError::NoDocumentsFound(input.display().to_string()));
    }
    Ok(documents.into_iter().map(|d| d.path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_is_document_extension() {
        assert!(is_document_extension("html"));
        assert!(is_document_extension("HTM"));
        assert!(!is_document_extension("json"));
        assert!(!is_document_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.html")).unwrap();
        File::create(dir.path().join("a.HTM")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("c.html")).unwrap();

        let flat = scan_folder(dir.path(), false).unwrap();
        let names: Vec<&str> = flat.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.HTM", "b.html"]);

        let deep = scan_folder(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_scan_missing_folder() {
        let result = scan_folder(Path::new("/nonexistent/folder/xyz"), false);
        assert!(matches!(result, Err(CuAnalyzerError::FolderNotFound(_))));
    }

    #[test]
    fn test_collect_inputs_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_inputs(dir.path(), false);
        assert!(matches!(result, Err(CuAnalyzerError::NoDocumentsFound(_))));
    }
}
