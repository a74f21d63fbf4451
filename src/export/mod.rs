pub mod excel;
pub mod html;
pub mod layout;
pub mod pdf;

use crate::analyzer::DocumentReport;
use crate::cli::ExportFormat;
use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Keep alphanumerics, space, `_` and `-`; everything else becomes `_`
pub fn safe_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || " _-".contains(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// File stem of a report's exports: NOSS code, else the source file stem
pub fn report_stem(report: &DocumentReport) -> String {
    let code = report.profile.get("NOSS CODE");
    if !code.trim().is_empty() {
        return safe_file_stem(code);
    }
    let source_stem = Path::new(&report.source)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    safe_file_stem(&source_stem)
}

fn output_path(output_dir: &Path, stem: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", stem, extension))
}

/// Export one report under `stem`; returns the written files
pub fn export_report(
    report: &DocumentReport,
    format: ExportFormat,
    output_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    if format.includes(ExportFormat::Pdf) {
        let path = output_path(output_dir, stem, "pdf");
        println!("- PDFを生成中...");
        pdf::generate_pdf(report, &path)?;
        println!("✔ PDF出力: {}", path.display());
        written.push(path);
    }

    if format.includes(ExportFormat::Html) {
        let path = output_path(output_dir, stem, "html");
        println!("- HTMLを生成中...");
        html::generate_html(report, &path)?;
        println!("✔ HTML出力: {}", path.display());
        written.push(path);
    }

    if format.includes(ExportFormat::Excel) {
        let path = output_path(output_dir, stem, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_excel(report, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Export several reports; repeated stems get a `_2`, `_3`, ... suffix
pub fn export_reports(
    reports: &[DocumentReport],
    format: ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::new();

    for report in reports {
        let stem = report_stem(report);
        let n = seen.entry(stem.clone()).or_insert(0);
        *n += 1;
        let stem = if *n == 1 { stem } else { format!("{}_{}", stem, n) };

        written.extend(export_report(report, format, output_dir, &stem)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("MC-010-3:2020"), "MC-010-3_2020");
        assert_eq!(safe_file_stem("a/b c"), "a_b c");
        assert_eq!(safe_file_stem("  "), "document");
        assert_eq!(safe_file_stem(""), "document");
    }
}
