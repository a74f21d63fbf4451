//! 静的HTMLレポート
//!
//! Self-contained page: profile, summary, keyword tables and every CU with
//! highlighted field texts. Highlight classes: `hl-gt`, `hl-ir`, `hl-verb`,
//! and `hl-sent` around units that pass the verb gate.

use crate::analyzer::{DocumentReport, ReportUnit};
use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::{Field, FieldHighlight, KeywordTally, Profile, SegmentKind, Taxonomy};
use std::collections::BTreeSet;
use std::path::Path;

const STYLE: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; font-size: 14px; margin: 24px; color: #222; }
h1 { font-size: 22px; margin-bottom: 4px; }
h2 { font-size: 17px; margin-top: 28px; border-bottom: 1px solid #ccc; }
.meta { color: #777; font-size: 12px; }
table { border-collapse: collapse; width: 100%; margin: 8px 0; }
th, td { border: 1px solid #aaa; padding: 4px 6px; vertical-align: top; text-align: left; }
th { background: #eef4ff; }
td.num { text-align: center; width: 70px; }
.category { font-weight: bold; font-size: 16px; }
.hl-gt { background: #c8e6c9; font-weight: bold; }
.hl-ir { background: #bbdefb; font-weight: bold; }
.hl-verb { background: #ffe0b2; text-decoration: underline; }
.hl-sent { border-bottom: 2px solid #ffb74d; }
.empty { color: #999; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn kind_at(highlight: &FieldHighlight, pos: usize) -> SegmentKind {
    highlight
        .segments
        .iter()
        .find(|s| s.start <= pos && pos < s.end)
        .map(|s| s.kind)
        .unwrap_or(SegmentKind::Plain)
}

/// Render one field text with highlight spans
pub fn render_field(text: &str, highlight: &FieldHighlight) -> String {
    if text.is_empty() {
        return String::new();
    }

    let qualifying: Vec<(usize, usize)> = highlight
        .units
        .iter()
        .filter(|u| u.qualifies)
        .map(|u| (u.start, u.end))
        .collect();

    let mut cuts: BTreeSet<usize> = BTreeSet::new();
    cuts.insert(0);
    cuts.insert(text.len());
    for s in &highlight.segments {
        cuts.insert(s.start);
        cuts.insert(s.end);
    }
    for &(start, end) in &qualifying {
        cuts.insert(start);
        cuts.insert(end);
    }
    let cuts: Vec<usize> = cuts.into_iter().filter(|&c| c <= text.len()).collect();

    let mut out = String::new();
    let mut in_sent = false;
    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some(piece) = text.get(a..b) else {
            continue;
        };

        let sent = qualifying.iter().any(|&(s, e)| s <= a && a < e);
        if sent != in_sent {
            out.push_str(if sent { "<span class=\"hl-sent\">" } else { "</span>" });
            in_sent = sent;
        }

        match kind_at(highlight, a).css_class() {
            Some(class) => {
                out.push_str(&format!("<span class=\"{}\">{}</span>", class, escape(piece)));
            }
            None => out.push_str(&escape(piece)),
        }
    }
    if in_sent {
        out.push_str("</span>");
    }
    out
}

fn profile_table(out: &mut String, profile: &Profile) {
    out.push_str("<h2>NOSS Profile</h2>\n<table>\n");
    for label in Profile::LABELS {
        out.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            escape(label),
            escape(profile.get(label))
        ));
    }
    out.push_str("</table>\n");
}

fn summary_tables(out: &mut String, report: &DocumentReport) {
    let s = &report.summary;
    let settings = &report.settings;

    out.push_str("<h2>Summary of CU Matching</h2>\n<table>\n");
    out.push_str("<tr><th>CU CODE</th><th>CU TITLE</th><th>GT (%)</th><th>IR4.0 (%)</th></tr>\n");
    for unit in &report.units {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            escape(&unit.code),
            escape(&unit.title),
            unit.score.total(Taxonomy::GreenTech),
            unit.score.total(Taxonomy::Ir4)
        ));
    }
    out.push_str("</table>\n");

    out.push_str(&format!(
        "<h2>Document-level Share of CUs &ge; {}%</h2>\n<table>\n",
        settings.pass_threshold
    ));
    out.push_str("<tr><th>Taxonomy</th><th>CUs passed</th><th>Share</th></tr>\n");
    for (name, passed, percent) in [
        ("Green Technology", s.green_pass, s.green_percent),
        ("IR4.0", s.ir_pass, s.ir_percent),
    ] {
        out.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{} / {}</td><td class=\"num\">{:.1}%</td></tr>\n",
            name, passed, s.total_units, percent
        ));
    }
    out.push_str("</table>\n");

    out.push_str(&format!(
        "<p class=\"category\">Category (threshold {}%): {}</p>\n",
        settings.share_threshold,
        escape(s.category.label())
    ));
    out.push_str(&format!(
        "<p class=\"meta\">Policy: {} &middot; engine: {} &middot; vocabulary {}</p>\n",
        escape(&report.policy),
        report.engine,
        escape(&report.vocabulary_fingerprint)
    ));
}

fn keyword_table(out: &mut String, title: &str, rows: &[KeywordTally]) {
    out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    if rows.is_empty() {
        out.push_str("<p class=\"empty\">No matches.</p>\n");
        return;
    }
    out.push_str("<table>\n<tr><th>Keyword</th><th>Amount</th><th>Examples</th></tr>\n");
    for row in rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>\n",
            escape(&row.base),
            row.amount,
            escape(&row.examples_text())
        ));
    }
    out.push_str("</table>\n");
}

fn unit_section(out: &mut String, index: usize, unit: &ReportUnit) {
    out.push_str(&format!(
        "<h2>CU {}: {} &ndash; {}</h2>\n<table>\n",
        index + 1,
        escape(&unit.code),
        escape(&unit.title)
    ));
    out.push_str("<tr><th>Field</th><th>Text</th><th>GT (%)</th><th>IR4.0 (%)</th></tr>\n");
    for field in Field::ALL {
        let text = unit.text(field);
        let body = if text.trim().is_empty() {
            "<span class=\"empty\">&mdash;</span>".to_string()
        } else {
            render_field(text, unit.highlight(field))
        };
        out.push_str(&format!(
            "<tr><th>{}</th><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            field,
            body,
            unit.score.green.get(field),
            unit.score.ir.get(field)
        ));
    }
    out.push_str(&format!(
        "<tr><th>TOTAL MATCH</th><td></td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n</table>\n",
        unit.score.total(Taxonomy::GreenTech),
        unit.score.total(Taxonomy::Ir4)
    ));
}

/// Build the full page
pub fn render_report(report: &DocumentReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape(report.title()),
        STYLE
    ));
    out.push_str(&format!("<h1>{}</h1>\n", escape(report.title())));
    out.push_str(&format!(
        "<p class=\"meta\">{} &middot; generated {}</p>\n",
        escape(&report.source),
        escape(&report.generated_at)
    ));
    out.push_str(
        "<p class=\"meta\">Legend: <span class=\"hl-gt\">Green Technology</span> \
         <span class=\"hl-ir\">IR4.0</span> <span class=\"hl-verb\">verb</span> \
         <span class=\"hl-sent\">qualifying unit</span></p>\n",
    );

    profile_table(&mut out, &report.profile);
    summary_tables(&mut out, report);
    keyword_table(&mut out, "Matched Keywords - Industrial Revolution", &report.keywords.ir);
    keyword_table(&mut out, "Matched Keywords - Green Technology", &report.keywords.green);
    for (i, unit) in report.units.iter().enumerate() {
        unit_section(&mut out, i, unit);
    }

    out.push_str("</body>\n</html>\n");
    out
}

pub fn generate_html(report: &DocumentReport, output_path: &Path) -> Result<()> {
    let html = render_report(report);
    std::fs::write(output_path, html)
        .map_err(|e| CuAnalyzerError::HtmlExport(format!("{}: {}", output_path.display(), e)))
}
