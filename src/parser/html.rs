//! NOSS HTML → Document
//!
//! Tables whose class list contains `table` are read in document order:
//! - first such table: profile (2-cell rows, label → value)
//! - table mentioning "CU CODE" and "CU TITLE": starts a new CU
//! - table mentioning "WORK ACTIVITIES" and "PERFORMANCE CRITERIA": WA/PC
//!   item pairs for the current CU (header row skipped)
//!
//! The reader is lenient: mismatched or unclosed tags are tolerated, and a
//! hard syntax error stops parsing with a warning, keeping what was read.

use cu_analyzer_common::{CompetencyUnit, Document, Profile};
use log::{debug, warn};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

const CU_KEYS: [&str; 3] = ["CU CODE", "CU TITLE", "CU DESCRIPTOR"];

#[derive(Debug, Default)]
struct Table {
    is_target: bool,
    /// td cell texts per tr
    rows: Vec<Vec<String>>,
    text: String,
    in_cell: bool,
}

impl Table {
    fn open_row(&mut self) {
        self.in_cell = false;
        self.rows.push(Vec::new());
    }

    fn open_cell(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(String::new());
        }
        self.in_cell = true;
    }

    fn push_cell_text(&mut self, text: &str) {
        if !self.in_cell {
            return;
        }
        if let Some(cell) = self.rows.last_mut().and_then(|r| r.last_mut()) {
            cell.push_str(text);
        }
    }

    /// Rows as whitespace-collapsed cell texts
    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| collapse_whitespace(c)).collect())
            .collect()
    }

    fn flat_text(&self) -> String {
        collapse_whitespace(&self.text)
    }
}

/// Collapse whitespace runs (including nbsp) to single spaces and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

fn has_table_class(e: &BytesStart<'_>) -> bool {
    e.html_attributes()
        .with_checks(false)
        .filter_map(|a| a.ok())
        .filter(|a| a.key.as_ref().eq_ignore_ascii_case(b"class"))
        .any(|a| {
            String::from_utf8_lossy(&a.value)
                .split_whitespace()
                .any(|token| token == "table")
        })
}

fn resolve_entity(r: &BytesRef<'_>) -> String {
    if let Ok(Some(c)) = r.resolve_char_ref() {
        return c.to_string();
    }
    let name = r.decode().unwrap_or_default();
    match name.as_ref() {
        "nbsp" => " ".to_string(),
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "ndash" => "–".to_string(),
        "mdash" => "—".to_string(),
        "rsquo" | "lsquo" => "'".to_string(),
        "rdquo" | "ldquo" => "\"".to_string(),
        other => format!("&{};", other),
    }
}

/// Walk the markup and collect every table
fn collect_tables(html: &[u8]) -> Vec<Table> {
    let mut reader = Reader::from_reader(html);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;
        config.trim_text(false);
    }

    let mut tables: Vec<Table> = Vec::new();
    // indices into `tables` of the currently open tables
    let mut open: Vec<usize> = Vec::new();
    let mut skip_depth = 0usize;
    let mut buf = Vec::new();

    let push_text = |tables: &mut Vec<Table>, open: &[usize], text: &str| {
        for &i in open {
            tables[i].text.push_str(text);
        }
        if let Some(&inner) = open.last() {
            tables[inner].push_cell_text(text);
        }
    };

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match tag_name(&e).as_str() {
                "script" | "style" => skip_depth += 1,
                "table" => {
                    tables.push(Table {
                        is_target: has_table_class(&e),
                        ..Table::default()
                    });
                    open.push(tables.len() - 1);
                }
                "tr" => {
                    push_text(&mut tables, &open, " ");
                    if let Some(&i) = open.last() {
                        tables[i].open_row();
                    }
                }
                "td" => {
                    push_text(&mut tables, &open, " ");
                    if let Some(&i) = open.last() {
                        tables[i].open_cell();
                    }
                }
                "th" => {
                    push_text(&mut tables, &open, " ");
                    if let Some(&i) = open.last() {
                        tables[i].in_cell = false;
                    }
                }
                "br" | "p" | "div" | "li" => push_text(&mut tables, &open, " "),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if tag_name(&e) == "br" {
                    push_text(&mut tables, &open, " ");
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                match name.as_str() {
                    "script" | "style" => skip_depth = skip_depth.saturating_sub(1),
                    "table" => {
                        open.pop();
                    }
                    "td" | "th" => {
                        if let Some(&i) = open.last() {
                            tables[i].in_cell = false;
                        }
                        // cells are separated like get_text(" ")
                        push_text(&mut tables, &open, " ");
                    }
                    "tr" | "p" | "div" | "li" => push_text(&mut tables, &open, " "),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if skip_depth == 0 {
                    let text = e.decode().unwrap_or_default();
                    push_text(&mut tables, &open, &text);
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if skip_depth == 0 {
                    push_text(&mut tables, &open, &resolve_entity(&r));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    "HTML parse stopped at byte {}: {}",
                    reader.error_position(),
                    e
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    tables
}

fn finish_unit(units: &mut Vec<CompetencyUnit>, head: Option<[String; 3]>, was: &[String], pcs: &[String]) {
    if let Some([code, title, descriptor]) = head {
        units.push(CompetencyUnit::from_items(&code, &title, &descriptor, was, pcs));
    }
}

/// HTMLバイト列をドキュメントに変換
pub fn parse_html(html: &[u8]) -> Document {
    let tables: Vec<Table> = collect_tables(html)
        .into_iter()
        .filter(|t| t.is_target)
        .collect();
    debug!("{} tables with class 'table'", tables.len());

    let mut profile = Profile::default();
    if let Some(first) = tables.first() {
        for row in first.cells() {
            if let [label, value] = row.as_slice() {
                profile.insert(label.clone(), value.clone());
            }
        }
    }

    let mut units = Vec::new();
    let mut head: Option<[String; 3]> = None;
    let mut was: Vec<String> = Vec::new();
    let mut pcs: Vec<String> = Vec::new();

    for table in &tables {
        let text = table.flat_text();

        if text.contains("CU CODE") && text.contains("CU TITLE") {
            finish_unit(&mut units, head.take(), &was, &pcs);
            was.clear();
            pcs.clear();

            let mut fields: [String; 3] = Default::default();
            for row in table.cells() {
                if let [key, value] = row.as_slice() {
                    if let Some(pos) = CU_KEYS.iter().position(|k| k == key) {
                        fields[pos] = value.clone();
                    }
                }
            }
            head = Some(fields);
        } else if text.contains("WORK ACTIVITIES") && text.contains("PERFORMANCE CRITERIA") {
            for row in table.cells().into_iter().skip(1) {
                if let [wa, pc] = row.as_slice() {
                    was.push(wa.clone());
                    pcs.push(pc.clone());
                }
            }
        }
    }
    finish_unit(&mut units, head, &was, &pcs);

    debug!("parsed {} competency units", units.len());
    Document { profile, units }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b\u{a0}c "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_only_table_class_is_read() {
        let html = br#"<html><body>
            <table class="layout"><tr><td>SECTION</td><td>ignored</td></tr></table>
            <table class="table table-bordered"><tr><td>SECTION</td><td>Manufacturing</td></tr></table>
        </body></html>"#;
        let doc = parse_html(html);
        assert_eq!(doc.profile.get("SECTION"), "Manufacturing");
    }

    #[test]
    fn test_entities_and_br() {
        let html = b"<table class=\"table\"><tr><td>NOSS TITLE</td><td>R&amp;D<br>Lab&nbsp;Work &#8211; A</td></tr></table>";
        let doc = parse_html(html);
        assert_eq!(doc.profile.get("NOSS TITLE"), "R&D Lab Work – A");
    }

    #[test]
    fn test_unclosed_tags_tolerated() {
        let html = b"<table class=table><tr><td>AREA<td>Energy</tr></table><p>tail";
        let doc = parse_html(html);
        assert_eq!(doc.profile.get("AREA"), "Energy");
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_html(b"");
        assert!(doc.units.is_empty());
        assert!(doc.profile.0.is_empty());
    }
}
