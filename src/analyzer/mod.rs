//! ドキュメント解析
//!
//! Scores every CU of a document, aggregates the document category and
//! tallies matched keywords. The matchers are built once per run and shared
//! read-only across files.

mod types;

pub use types::{DocumentReport, ReportUnit};

use crate::config::Config;
use crate::error::{CuAnalyzerError, Result};
use crate::parser;
use crate::store::KeywordStore;
use cu_analyzer_common::{
    aggregate, highlight_field, tally_keywords, Document, EngineKind, Field, FieldMap,
    ScoringSession, ScoringSettings, Taxonomy, UnitTotals, Vocabulary,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Built-in vocabulary with the persisted custom keywords merged in
pub fn load_vocabulary(store_dir: &Path) -> Vocabulary {
    let mut vocabulary = Vocabulary::builtin();
    for taxonomy in Taxonomy::ALL {
        let custom = KeywordStore::load_keywords(store_dir, taxonomy);
        if !custom.is_empty() {
            debug!("{} custom {} keywords", custom.len(), taxonomy.prefix());
        }
        vocabulary = vocabulary.with_custom(taxonomy, &custom);
    }
    vocabulary
}

/// Matchers for a run
pub fn build_session(config: &Config) -> Result<ScoringSession> {
    let vocabulary = load_vocabulary(&config.store_dir());
    let session = ScoringSession::build(&vocabulary, config.engine)?;

    let conflicts = session.keywords.conflicts();
    if !conflicts.is_empty() {
        info!("{} surfaces claimed by more than one base (last wins)", conflicts.len());
    }
    debug!(
        "{} keyword surfaces, {} verb surfaces ({} engine)",
        session.keywords.surfaces().len(),
        session.verbs.surfaces().len(),
        config.engine
    );
    Ok(session)
}

/// Short SHA-256 of the surface → base table
pub fn vocabulary_fingerprint(session: &ScoringSession) -> String {
    let mut hasher = Sha256::new();
    for surface in session.keywords.surfaces() {
        let base = session.keywords.base_of(surface).unwrap_or("");
        hasher.update(surface.as_bytes());
        hasher.update(b"\t");
        hasher.update(base.as_bytes());
        for taxonomy in session.keywords.taxonomies_of(base) {
            hasher.update(b"\t");
            hasher.update(taxonomy.prefix().as_bytes());
        }
        hasher.update(b"\n");
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

/// Score one document
pub fn analyze_document(
    source: &str,
    document: &Document,
    settings: &ScoringSettings,
    engine: EngineKind,
    session: &ScoringSession,
) -> DocumentReport {
    let units: Vec<ReportUnit> = document
        .units
        .iter()
        .map(|unit| {
            let score = session.score_unit(unit, settings);
            let highlights = FieldMap::from_fn(|field: Field| {
                highlight_field(
                    field,
                    unit.field(field),
                    session,
                    settings.policy.requires_verbs(field),
                )
            });
            ReportUnit {
                code: unit.code.clone(),
                title: unit.title.clone(),
                texts: FieldMap::from_fn(|field| unit.field(field).to_string()),
                score,
                highlights,
            }
        })
        .collect();

    let totals: Vec<UnitTotals> = units
        .iter()
        .map(|u| UnitTotals {
            green: u.score.total(Taxonomy::GreenTech),
            ir: u.score.total(Taxonomy::Ir4),
        })
        .collect();
    let summary = aggregate(&totals, settings.pass_threshold, settings.share_threshold);
    let keywords = tally_keywords(&document.units, &settings.policy, session);

    debug!(
        "{}: {} CUs, GT {:.1}% / IR {:.1}% → {}",
        source,
        summary.total_units,
        summary.green_percent,
        summary.ir_percent,
        summary.category
    );

    DocumentReport {
        source: source.to_string(),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        profile: document.profile.clone(),
        units,
        summary,
        keywords,
        settings: *settings,
        engine,
        policy: settings.policy.describe(),
        vocabulary_fingerprint: vocabulary_fingerprint(session),
    }
}

/// Outcome of a multi-file run; a bad file does not stop the others
#[derive(Debug, Default)]
pub struct AnalysisRun {
    pub reports: Vec<DocumentReport>,
    pub failures: Vec<(PathBuf, CuAnalyzerError)>,
}

fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let progress_bar = ProgressBar::new(total as u64);
    match ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
        Ok(style) => progress_bar.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("progress style: {}", e),
    }
    progress_bar
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse and score files in parallel, keeping input order
pub fn analyze_files(
    paths: &[PathBuf],
    config: &Config,
    session: &ScoringSession,
    show_progress: bool,
) -> AnalysisRun {
    let settings = config.scoring_settings();
    let progress_bar = create_progress_bar(paths.len(), show_progress);

    let outcomes: Vec<(PathBuf, Result<DocumentReport>)> = paths
        .par_iter()
        .map(|path| {
            let outcome = parser::load_document(path).map(|document| {
                analyze_document(&source_name(path), &document, &settings, config.engine, session)
            });
            progress_bar.inc(1);
            (path.clone(), outcome)
        })
        .collect();
    progress_bar.finish_and_clear();

    let mut run = AnalysisRun::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => run.reports.push(report),
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                run.failures.push((path, e));
            }
        }
    }
    run
}

/// Read a report JSON written by `analyze` (one report or an array of them)
pub fn load_reports(path: &Path) -> Result<Vec<DocumentReport>> {
    if !path.exists() {
        return Err(CuAnalyzerError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// Write reports; a single report is written as an object
pub fn save_reports(reports: &[DocumentReport], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    };
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cu_analyzer_common::{Category, CompetencyUnit, CountMode, ScoringPolicy};
    use tempfile::TempDir;

    fn session() -> ScoringSession {
        let mut v = Vocabulary::default();
        v.green.push_base("solar panel");
        v.green.push_base("emissions");
        v.ir.push_base("drone");
        ScoringSession::build(&v, EngineKind::Regex).unwrap()
    }

    fn document() -> Document {
        let mut doc = Document::default();
        doc.profile.insert("NOSS TITLE", "Renewable Energy Technician");
        doc.units.push(CompetencyUnit::from_items(
            "C01",
            "Solar panel installation",
            "Install solar panels and reduce emissions",
            &["Install solar panel arrays", "Inspect drone footage"],
            &["Emissions recorded"],
        ));
        doc.units.push(CompetencyUnit::from_items("C02", "Workplace safety", "", &[] as &[&str], &[]));
        doc
    }

    #[test]
    fn test_analyze_document() {
        let settings = ScoringSettings::default();
        let report = analyze_document("doc.html", &document(), &settings, EngineKind::Regex, &session());

        assert_eq!(report.units.len(), 2);
        assert_eq!(report.title(), "Renewable Energy Technician");
        assert_eq!(report.summary.total_units, 2);
        assert!(report.units[0].score.total(Taxonomy::GreenTech) > 0);
        assert_eq!(report.units[1].score.total(Taxonomy::GreenTech), 0);
        assert_eq!(report.keywords.green[0].base, "solar panel");
        assert_eq!(report.vocabulary_fingerprint.len(), 16);
    }

    #[test]
    fn test_highlights_match_texts() {
        let settings = ScoringSettings {
            policy: ScoringPolicy::Global {
                count_mode: CountMode::Repeated,
                require_verbs: true,
            },
            ..ScoringSettings::default()
        };
        let report = analyze_document("doc.html", &document(), &settings, EngineKind::Regex, &session());
        let unit = &report.units[0];
        for field in Field::ALL {
            let text = unit.text(field);
            let joined: String = unit.highlight(field).pieces(text).map(|(t, _)| t).collect();
            assert_eq!(joined, text);
        }
        assert!(!unit.highlight(Field::WorkActivity).units.is_empty());
    }

    #[test]
    fn test_empty_document_is_unmatched() {
        let settings = ScoringSettings::default();
        let report = analyze_document("empty.html", &Document::default(), &settings, EngineKind::Regex, &session());
        assert_eq!(report.summary.category, Category::Unmatched);
        assert_eq!(report.title(), "empty.html");
    }

    #[test]
    fn test_fingerprint_tracks_vocabulary() {
        let a = vocabulary_fingerprint(&session());
        let mut v = Vocabulary::default();
        v.green.push_base("solar panel");
        let b = vocabulary_fingerprint(&ScoringSession::build(&v, EngineKind::Regex).unwrap());
        assert_ne!(a, b);
        assert_eq!(a, vocabulary_fingerprint(&session()));
    }

    #[test]
    fn test_save_and_load_reports() {
        let dir = TempDir::new().unwrap();
        let report = analyze_document(
            "doc.html",
            &document(),
            &ScoringSettings::default(),
            EngineKind::Regex,
            &session(),
        );

        let single = dir.path().join("one.json");
        save_reports(std::slice::from_ref(&report), &single).unwrap();
        assert_eq!(load_reports(&single).unwrap(), vec![report.clone()]);

        let many = dir.path().join("many.json");
        save_reports(&[report.clone(), report.clone()], &many).unwrap();
        assert_eq!(load_reports(&many).unwrap().len(), 2);

        assert!(matches!(
            load_reports(&dir.path().join("missing.json")),
            Err(CuAnalyzerError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_analyze_files_keeps_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(
            &good,
            r#"{"units":[{"code":"C01","title":"Solar panel upkeep"}]}"#,
        )
        .unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{oops").unwrap();

        let config = Config::default();
        let run = analyze_files(&[good, bad.clone()], &config, &session(), false);
        assert_eq!(run.reports.len(), 1);
        assert_eq!(run.reports[0].source, "good.json");
        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].0, bad);
    }
}
