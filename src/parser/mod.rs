//! Document ingestion: NOSS HTML pages and manual-entry JSON

mod html;
mod manual;

pub use html::{collapse_whitespace, parse_html};
pub use manual::parse_manual_json;

use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::Document;
use std::path::Path;

/// Load a document by extension (`.json` = manual entry, otherwise HTML)
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(CuAnalyzerError::FileNotFound(path.display().to_string()));
    }

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let content = std::fs::read_to_string(path)?;
        parse_manual_json(&content)
    } else {
        let bytes = std::fs::read(path)?;
        let document = parse_html(&bytes);
        if document.units.is_empty() && document.profile.0.is_empty() {
            return Err(CuAnalyzerError::HtmlParse(format!(
                "NOSSのテーブルが見つかりません: {}",
                path.display()
            )));
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_document_by_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("manual.json");
        std::fs::write(&json, r#"{"units":[{"code":"C01","title":"Energy audit"}]}"#).unwrap();
        assert_eq!(load_document(&json).unwrap().units[0].code, "C01");

        let html = dir.path().join("page.html");
        std::fs::write(&html, "<table class=\"table\"><tr><td>NOSS CODE</td><td>X-1</td></tr></table>").unwrap();
        assert_eq!(load_document(&html).unwrap().profile.get("NOSS CODE"), "X-1");
    }

    #[test]
    fn test_load_document_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_document(&dir.path().join("missing.html")),
            Err(CuAnalyzerError::FileNotFound(_))
        ));

        let plain = dir.path().join("plain.html");
        std::fs::write(&plain, "<html><body><p>no tables</p></body></html>").unwrap();
        assert!(matches!(load_document(&plain), Err(CuAnalyzerError::HtmlParse(_))));
    }
}
