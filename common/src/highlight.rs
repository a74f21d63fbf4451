//! Highlight segments for presentation
//!
//! Splits a field text into ordered, non-overlapping segments (plain,
//! keyword, verb) whose byte offsets point into the original text.
//! Verbs appear only inside qualifying units.

use crate::scoring::ScoringSession;
use crate::types::{Field, Taxonomy};
use crate::verbs::gate_field;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    Plain,
    Keyword(Taxonomy),
    Verb,
}

impl SegmentKind {
    /// CSS class used by the HTML / PDF renderers
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            SegmentKind::Plain => None,
            SegmentKind::Keyword(Taxonomy::GreenTech) => Some("hl-gt"),
            SegmentKind::Keyword(Taxonomy::Ir4) => Some("hl-ir"),
            SegmentKind::Verb => Some("hl-verb"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub kind: SegmentKind,
}

/// Unit boundaries and gate outcome (only populated for gated fields)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMark {
    pub start: usize,
    pub end: usize,
    pub qualifies: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHighlight {
    pub segments: Vec<Segment>,
    pub units: Vec<UnitMark>,
}

impl FieldHighlight {
    /// Segments paired with their text
    pub fn pieces<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (&'a str, SegmentKind)> + 'a {
        self.segments
            .iter()
            .map(move |s| (&text[s.start..s.end], s.kind))
    }
}

/// Highlight one field.
///
/// Keywords are always marked (GreenTech colour when the base is in both
/// taxonomies). With `gated`, verbs of qualifying units are marked too and
/// unit boundaries are reported.
pub fn highlight_field(
    field: Field,
    text: &str,
    session: &ScoringSession,
    gated: bool,
) -> FieldHighlight {
    let mut marks: Vec<(usize, usize, SegmentKind)> = Vec::new();
    let mut units = Vec::new();

    let colour = |base: &str| {
        if session.keywords.belongs(base, Taxonomy::GreenTech) {
            SegmentKind::Keyword(Taxonomy::GreenTech)
        } else {
            SegmentKind::Keyword(Taxonomy::Ir4)
        }
    };

    if gated {
        for unit in gate_field(field, text, &session.keywords, &session.verbs) {
            units.push(UnitMark {
                start: unit.start,
                end: unit.end,
                qualifies: unit.qualifies,
            });
            marks.extend(unit.keywords.iter().map(|k| (k.start, k.end, colour(&k.base))));
            if unit.qualifies {
                marks.extend(unit.verbs.iter().map(|v| (v.start, v.end, SegmentKind::Verb)));
            }
        }
    } else {
        marks.extend(
            session
                .keywords
                .find_spans(text)
                .iter()
                .map(|k| (k.start, k.end, colour(&k.base))),
        );
    }

    // 開始位置順、同位置ならキーワード優先
    marks.sort_by_key(|&(start, _, kind)| (start, kind == SegmentKind::Verb));

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end, kind) in marks {
        if start < cursor {
            continue;
        }
        if start > cursor {
            segments.push(Segment {
                start: cursor,
                end: start,
                kind: SegmentKind::Plain,
            });
        }
        segments.push(Segment { start, end, kind });
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment {
            start: cursor,
            end: text.len(),
            kind: SegmentKind::Plain,
        });
    }

    FieldHighlight { segments, units }
}
