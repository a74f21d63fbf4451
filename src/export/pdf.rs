//! PDF生成（printpdf）
//!
//! A4 portrait. Page 1 onward: profile, scoring settings, CU summary,
//! document share, category and matched-keyword tables. Then one page per
//! CU with highlighted field texts. Every page gets a "Page i / n" footer.

use super::layout::*;
use crate::analyzer::{DocumentReport, ReportUnit};
use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::{Field, KeywordTally, Profile, SegmentKind, Taxonomy};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const GREY: (f32, f32, f32) = (0.45, 0.45, 0.45);
const GREEN: (f32, f32, f32) = (0.05, 0.50, 0.15);
const BLUE: (f32, f32, f32) = (0.10, 0.30, 0.75);
const ORANGE: (f32, f32, f32) = (0.80, 0.40, 0.00);

fn segment_colour(kind: SegmentKind) -> (f32, f32, f32) {
    match kind {
        SegmentKind::Plain => BLACK,
        SegmentKind::Keyword(Taxonomy::GreenTech) => GREEN,
        SegmentKind::Keyword(Taxonomy::Ir4) => BLUE,
        SegmentKind::Verb => ORANGE,
    }
}

/// Cursor-based page writer; y is measured from the bottom in mm
struct PageWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layers: Vec<PdfLayerReference>,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CuAnalyzerError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CuAnalyzerError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
        let first = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            regular,
            bold,
            layers: vec![first],
            y: A4_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn layer(&self) -> &PdfLayerReference {
        // layers is never empty after new()
        &self.layers[self.layers.len() - 1]
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
        self.layers.push(self.doc.get_page(page).get_layer(layer));
        self.y = A4_HEIGHT_MM - MARGIN_MM;
    }

    /// Start a new page unless `height_mm` still fits above the footer
    fn ensure_space(&mut self, height_mm: f32) {
        if self.y - height_mm < MARGIN_MM + FOOTER_MM {
            self.new_page();
        }
    }

    fn set_colour(&self, (r, g, b): (f32, f32, f32)) {
        self.layer().set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn text_at(&self, text: &str, size: f32, x_mm: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer().use_text(text, size, Mm(x_mm), Mm(self.y), font);
    }

    fn advance(&mut self, size: f32) {
        self.y -= line_height_mm(size);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_space(line_height_mm(size));
        self.advance(size);
        self.text_at(text, size, MARGIN_MM, bold);
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(line_height_mm(HEADING_SIZE_PT) * 3.0);
        self.y -= 2.0;
        self.line(text, HEADING_SIZE_PT, true);
        self.y -= 1.0;
    }

    fn paragraph(&mut self, text: &str, size: f32) {
        for line in wrap_text(text, chars_per_line(USABLE_WIDTH_MM, size)) {
            self.line(&line, size, false);
        }
    }

    fn rule(&mut self) {
        self.y -= 1.5;
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(self.y)), false),
                (Point::new(Mm(A4_WIDTH_MM - MARGIN_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        };
        self.layer().set_outline_color(Color::Rgb(Rgb::new(GREY.0, GREY.1, GREY.2, None)));
        self.layer().set_outline_thickness(0.5);
        self.layer().add_line(line);
        self.y -= 1.5;
    }

    /// One table row; each cell is wrapped to its column and the row grows
    /// to the tallest cell
    fn row(&mut self, cells: &[String], widths: &[f32], bold: bool) {
        let size = BODY_SIZE_PT;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap_text(cell, chars_per_line(w - 2.0, size)))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        self.ensure_space(line_height_mm(size) * lines as f32);

        let top = self.y;
        for i in 0..lines {
            self.y = top - line_height_mm(size) * (i as f32 + 1.0);
            let mut x = MARGIN_MM;
            for (cell, w) in wrapped.iter().zip(widths) {
                if let Some(text) = cell.get(i) {
                    self.text_at(text, size, x + 1.0, bold);
                }
                x += w;
            }
        }
        self.y = top - line_height_mm(size) * lines as f32 - 0.8;
    }

    /// Wrapped text with coloured runs
    fn styled(&mut self, pieces: &[(&str, SegmentKind)], indent_mm: f32) {
        let size = BODY_SIZE_PT;
        let max_chars = chars_per_line(USABLE_WIDTH_MM - indent_mm, size);
        let lines = wrap_runs(pieces.iter().copied(), max_chars);

        for line in lines {
            self.ensure_space(line_height_mm(size));
            self.advance(size);

            let layer = self.layer().clone();
            layer.begin_text_section();
            layer.set_font(&self.regular, size);
            layer.set_text_cursor(Mm(MARGIN_MM + indent_mm), Mm(self.y));
            for (text, kind) in &line {
                let font = if *kind == SegmentKind::Plain { &self.regular } else { &self.bold };
                let (r, g, b) = segment_colour(*kind);
                layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
                layer.set_font(font, size);
                layer.write_text(text.as_str(), font);
            }
            layer.end_text_section();
        }
        self.set_colour(BLACK);
    }

    /// "Page i / n" on every page
    fn number_pages(&self) {
        let total = self.layers.len();
        for (i, layer) in self.layers.iter().enumerate() {
            layer.set_fill_color(Color::Rgb(Rgb::new(GREY.0, GREY.1, GREY.2, None)));
            layer.use_text(
                format!("Page {} / {}", i + 1, total),
                SMALL_SIZE_PT,
                Mm(A4_WIDTH_MM / 2.0 - 8.0),
                Mm(MARGIN_MM / 2.0),
                &self.regular,
            );
        }
    }

    fn save(self, output_path: &Path) -> Result<()> {
        self.number_pages();
        let file = File::create(output_path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| CuAnalyzerError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;
        Ok(())
    }
}

fn write_profile(w: &mut PageWriter, profile: &Profile) {
    w.heading("NOSS PROFILE");
    for label in Profile::LABELS {
        w.paragraph(&format!("{}: {}", label, profile.get(label)), BODY_SIZE_PT);
    }
}

fn write_settings(w: &mut PageWriter, report: &DocumentReport) {
    let s = &report.settings;
    w.heading("Scoring settings");
    w.paragraph(&format!("Policy: {} ({} engine)", report.policy, report.engine), BODY_SIZE_PT);
    let fields: Vec<String> = Field::ALL
        .iter()
        .map(|f| format!("{} {}% / min {}", f, s.weights.get(*f), s.thresholds.get(*f)))
        .collect();
    w.paragraph(&format!("Weights: {}", fields.join("; ")), BODY_SIZE_PT);
    w.paragraph(
        &format!(
            "CU pass threshold: {}%   Document share threshold: {}%",
            s.pass_threshold, s.share_threshold
        ),
        BODY_SIZE_PT,
    );
}

fn write_summary(w: &mut PageWriter, report: &DocumentReport) {
    let pass = report.settings.pass_threshold;
    w.heading("Summary of CU Matching");
    w.row(
        &["CU CODE".into(), "CU TITLE".into(), "GT (%)".into(), "IR4.0 (%)".into()],
        &SCORE_COLUMNS_MM,
        true,
    );
    for unit in &report.units {
        w.row(
            &[
                unit.code.clone(),
                truncate(&unit.title, 120),
                unit.score.total(Taxonomy::GreenTech).to_string(),
                unit.score.total(Taxonomy::Ir4).to_string(),
            ],
            &SCORE_COLUMNS_MM,
            false,
        );
    }

    let summary = &report.summary;
    w.heading(&format!("Document-level Share of CUs >= {}%", pass));
    let widths = [60.0, 60.0, 60.0];
    w.row(&["Taxonomy".into(), "CUs passed".into(), "Share".into()], &widths, true);
    w.row(
        &[
            "Green Technology".into(),
            format!("{} / {}", summary.green_pass, summary.total_units),
            format!("{:.1}%", summary.green_percent),
        ],
        &widths,
        false,
    );
    w.row(
        &[
            "IR4.0".into(),
            format!("{} / {}", summary.ir_pass, summary.total_units),
            format!("{:.1}%", summary.ir_percent),
        ],
        &widths,
        false,
    );

    w.y -= 2.0;
    w.line(
        &format!(
            "Category (threshold {}%): {}",
            report.settings.share_threshold, summary.category
        ),
        HEADING_SIZE_PT,
        true,
    );
}

fn write_keyword_table(w: &mut PageWriter, title: &str, rows: &[KeywordTally]) {
    w.heading(title);
    if rows.is_empty() {
        w.paragraph("No matches.", BODY_SIZE_PT);
        return;
    }
    w.row(
        &["Keyword".into(), "Amount".into(), "Examples".into()],
        &KEYWORD_COLUMNS_MM,
        true,
    );
    for row in rows {
        w.row(
            &[row.base.clone(), row.amount.to_string(), row.examples_text()],
            &KEYWORD_COLUMNS_MM,
            false,
        );
    }
}

fn write_unit(w: &mut PageWriter, index: usize, unit: &ReportUnit) {
    w.new_page();
    w.line(&format!("CU {}: {}", index + 1, unit.code), TITLE_SIZE_PT, true);
    w.paragraph(&unit.title, HEADING_SIZE_PT);
    w.rule();

    for field in Field::ALL {
        let text = unit.text(field);
        w.y -= 1.5;
        w.line(
            &format!(
                "{}   GT {}%   IR4.0 {}%",
                field,
                unit.score.green.get(field),
                unit.score.ir.get(field)
            ),
            BODY_SIZE_PT,
            true,
        );
        if text.trim().is_empty() {
            w.set_colour(GREY);
            w.paragraph("-", BODY_SIZE_PT);
            w.set_colour(BLACK);
            continue;
        }
        let pieces: Vec<(&str, SegmentKind)> = unit.highlight(field).pieces(text).collect();
        if pieces.is_empty() {
            w.paragraph(text, BODY_SIZE_PT);
        } else {
            w.styled(&pieces, 3.0);
        }
    }

    w.rule();
    w.line(
        &format!(
            "TOTAL MATCH   GT {}%   IR4.0 {}%",
            unit.score.total(Taxonomy::GreenTech),
            unit.score.total(Taxonomy::Ir4)
        ),
        HEADING_SIZE_PT,
        true,
    );

    w.y -= 2.0;
    w.set_colour(GREY);
    w.line("Legend:", SMALL_SIZE_PT, false);
    w.styled(
        &[
            ("Green Technology keyword", SegmentKind::Keyword(Taxonomy::GreenTech)),
            ("   ", SegmentKind::Plain),
            ("IR4.0 keyword", SegmentKind::Keyword(Taxonomy::Ir4)),
            ("   ", SegmentKind::Plain),
            ("qualifying verb", SegmentKind::Verb),
        ],
        0.0,
    );
}

/// Write the PDF report of one document
pub fn generate_pdf(report: &DocumentReport, output_path: &Path) -> Result<()> {
    let mut w = PageWriter::new(report.title())?;

    w.line("CU Green Technology / IR4.0 Analysis", TITLE_SIZE_PT, true);
    w.set_colour(GREY);
    w.line(
        &format!("{}   generated {}   vocabulary {}", report.source, report.generated_at, report.vocabulary_fingerprint),
        SMALL_SIZE_PT,
        false,
    );
    w.set_colour(BLACK);

    write_profile(&mut w, &report.profile);
    write_settings(&mut w, report);
    write_summary(&mut w, report);
    write_keyword_table(&mut w, "Matched Keywords - Industrial Revolution", &report.keywords.ir);
    write_keyword_table(&mut w, "Matched Keywords - Green Technology", &report.keywords.green);

    for (i, unit) in report.units.iter().enumerate() {
        write_unit(&mut w, i, unit);
    }

    w.save(output_path)
}
