//! PDF/HTML/Excel出力の統合テスト

use cu_analyzer::analyzer::{analyze_document, load_reports, save_reports, DocumentReport};
use cu_analyzer::cli::ExportFormat;
use cu_analyzer::export::{self, excel, html, pdf};
use cu_analyzer_common::{
    CompetencyUnit, CountMode, Document, EngineKind, Profile, ScoringPolicy, ScoringSession,
    ScoringSettings, Vocabulary,
};
use tempfile::tempdir;

fn create_test_document(units: usize) -> Document {
    let mut profile = Profile::default();
    profile.insert("NOSS CODE", "EG-020-4:2023");
    profile.insert("NOSS TITLE", "Renewable Energy Plant Operation");
    profile.insert("SECTION", "ELECTRICITY");

    let units = (1..=units)
        .map(|i| {
            CompetencyUnit::from_items(
                &format!("C{:02}", i),
                "Solar Photovoltaic System Monitoring",
                "Install sensors using internet of things devices. Apply machine learning to big data.",
                &[
                    "Install solar photovoltaic panels",
                    "Monitor carbon footprint <daily> & weekly",
                ],
                &["Panels installed per renewable energy guidelines"],
            )
        })
        .collect();
    Document { profile, units }
}

fn create_test_report(units: usize) -> DocumentReport {
    let session = ScoringSession::build(&Vocabulary::builtin(), EngineKind::Regex).unwrap();
    let settings = ScoringSettings {
        policy: ScoringPolicy::Global {
            count_mode: CountMode::Repeated,
            require_verbs: true,
        },
        ..ScoringSettings::default()
    };
    analyze_document(
        "eg-020.html",
        &create_test_document(units),
        &settings,
        EngineKind::Regex,
        &session,
    )
}

fn assert_non_empty(path: &std::path::Path) {
    assert!(path.exists(), "ファイルが作成されていない: {}", path.display());
    let metadata = std::fs::metadata(path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "ファイルが空: {}", path.display());
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.pdf");

    let result = pdf::generate_pdf(&create_test_report(3), &output_path);
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert_non_empty(&output_path);

    let bytes = std::fs::read(&output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_generation_without_units() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.pdf");

    let result = pdf::generate_pdf(&create_test_report(0), &output_path);
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert_non_empty(&output_path);
}

#[test]
fn test_html_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.html");

    html::generate_html(&create_test_report(2), &output_path).unwrap();
    assert_non_empty(&output_path);

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("Renewable Energy Plant Operation"));
    assert!(content.contains("C02"));
    assert!(content.contains("hl-gt"));
    assert!(content.contains("hl-verb"));
    assert!(content.contains("&lt;daily&gt; &amp; weekly"));
    assert!(!content.contains("<daily>"));
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.xlsx");

    let result = excel::generate_excel(&create_test_report(3), &output_path);
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert_non_empty(&output_path);

    // xlsx は zip
    let bytes = std::fs::read(&output_path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_reports_all_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let reports = vec![create_test_report(1), create_test_report(1)];

    let written = export::export_reports(&reports, ExportFormat::All, dir.path()).unwrap();
    assert_eq!(written.len(), 6);
    for name in [
        "EG-020-4_2023.pdf",
        "EG-020-4_2023.html",
        "EG-020-4_2023.xlsx",
        "EG-020-4_2023_2.pdf",
        "EG-020-4_2023_2.html",
        "EG-020-4_2023_2.xlsx",
    ] {
        assert_non_empty(&dir.path().join(name));
    }
}

#[test]
fn test_saved_report_exports_identically() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = create_test_report(2);
    let json_path = dir.path().join("report.json");

    save_reports(std::slice::from_ref(&report), &json_path).unwrap();
    let loaded = load_reports(&json_path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].summary, report.summary);
    assert_eq!(loaded[0].units[0].highlights, report.units[0].highlights);

    assert_eq!(html::render_report(&loaded[0]), html::render_report(&report));
}
