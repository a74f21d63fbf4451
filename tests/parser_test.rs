//! NOSS文書読み込みの統合テスト
//!
//! HTML/JSON fixtures through `load_document` and on into scoring.

use cu_analyzer::analyzer::{analyze_document, build_session};
use cu_analyzer::config::Config;
use cu_analyzer::parser::{load_document, parse_html};
use cu_analyzer_common::{Category, EngineKind, Field};
use tempfile::tempdir;

const NOSS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>NOSS</title></head>
<body>
<div class="container">
  <table class="table table-bordered">
    <tr><td>SECTION</td><td>ELECTRICITY, GAS, STEAM</td></tr>
    <tr><td>NOSS CODE</td><td>EG-020-4:2023</td></tr>
    <tr><td>NOSS TITLE</td><td>Renewable Energy Plant Operation</td></tr>
    <tr><td>NOSS LEVEL</td><td>Four (4)</td></tr>
  </table>

  <table class="table">
    <tr><td>CU CODE</td><td>EG-020-4:2023-C01</td></tr>
    <tr><td>CU TITLE</td><td>Solar Photovoltaic System Monitoring</td></tr>
    <tr><td>CU DESCRIPTOR</td><td>This CU covers operation of solar photovoltaic plants. Install monitoring sensors using internet of things devices.</td></tr>
  </table>
  <table class="table">
    <tr><td>WORK ACTIVITIES</td><td>PERFORMANCE CRITERIA</td></tr>
    <tr><td>Install solar photovoltaic panels</td><td>Panels installed per renewable energy guidelines</td></tr>
    <tr><td>Monitor carbon footprint</td><td>Carbon footprint recorded</td></tr>
  </table>

  <table class="table">
    <tr><td>CU CODE</td><td>EG-020-4:2023-C02</td></tr>
    <tr><td>CU TITLE</td><td>Workplace Communication</td></tr>
    <tr><td>CU DESCRIPTOR</td><td>Covers reporting to supervisors.</td></tr>
  </table>
  <table class="table">
    <tr><td>WORK ACTIVITIES</td><td>PERFORMANCE CRITERIA</td></tr>
    <tr><td>Prepare shift report</td><td>Report prepared</td></tr>
    <tr><td>&nbsp;</td><td>&nbsp;</td></tr>
  </table>
</div>
</body>
</html>"#;

#[test]
fn test_noss_html_profile_and_units() {
    let doc = parse_html(NOSS_HTML.as_bytes());

    assert_eq!(doc.profile.get("NOSS CODE"), "EG-020-4:2023");
    assert_eq!(doc.profile.get("NOSS TITLE"), "Renewable Energy Plant Operation");
    assert_eq!(doc.units.len(), 2);

    let first = &doc.units[0];
    assert_eq!(first.code, "EG-020-4:2023-C01");
    assert_eq!(first.title, "Solar Photovoltaic System Monitoring");
    assert_eq!(
        first.work_activity,
        "Install solar photovoltaic panels - Monitor carbon footprint"
    );
    assert_eq!(
        first.items(Field::PerformanceCriteria),
        vec!["Panels installed per renewable energy guidelines", "Carbon footprint recorded"]
    );

    // blank rows do not produce items
    let second = &doc.units[1];
    assert_eq!(second.items(Field::WorkActivity), vec!["Prepare shift report"]);
}

#[test]
fn test_html_file_scored_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("eg-020.html");
    std::fs::write(&path, NOSS_HTML).unwrap();

    let document = load_document(&path).expect("HTML読み込み失敗");
    let config = Config {
        store_dir: Some(dir.path().join("store")),
        ..Config::default()
    };
    let session = build_session(&config).unwrap();
    let report = analyze_document(
        "eg-020.html",
        &document,
        &config.scoring_settings(),
        EngineKind::Regex,
        &session,
    );

    assert_eq!(report.title(), "Renewable Energy Plant Operation");
    assert_eq!(report.units.len(), 2);
    assert!(report.units[0].score.total(cu_analyzer_common::Taxonomy::GreenTech) > 0);
    assert_eq!(report.units[1].score.total(cu_analyzer_common::Taxonomy::GreenTech), 0);
    assert_eq!(report.summary.total_units, 2);
    assert_ne!(report.summary.category, Category::Combined);
}

#[test]
fn test_manual_json_document() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("manual.json");
    std::fs::write(
        &path,
        r#"{
            "profile": { "NOSS CODE": "MN-001-2:2024" },
            "units": [
                { "code": "C01", "title": "Biogas Digester Operation",
                  "descriptor": "", "wa": ["Operate digester", ""], "pc": ["Digester operated"] }
            ]
        }"#,
    )
    .unwrap();

    let document = load_document(&path).unwrap();
    assert_eq!(document.profile.get("NOSS CODE"), "MN-001-2:2024");
    assert_eq!(document.units[0].work_activity, "Operate digester");
    assert_eq!(document.units[0].performance_criteria, "Digester operated");
}
