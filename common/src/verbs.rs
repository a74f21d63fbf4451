//! Verb gate
//!
//! A keyword hit only counts when an action verb starts before it in the same
//! unit. Units are sentences for CU TITLE / CU DESCRIPTOR and list items for
//! WORK ACTIVITY / PERFORMANCE CRITERIA. Gating is strictly unit-local.

use crate::error::Result;
use crate::matcher::{EngineKind, KeywordMatcher, PhraseMatcher};
use crate::types::{Field, MatchSpan};
use lazy_static::lazy_static;
use regex::Regex;

/// Action verbs of competency statements
pub const DEFAULT_VERBS: &[&str] = &[
    "adjust", "analyse", "analyze", "apply", "assemble", "assess", "audit",
    "build", "calculate", "calibrate", "carry out", "check", "clean", "collect",
    "commission", "compile", "conduct", "configure", "construct", "control",
    "coordinate", "create", "deploy", "design", "determine", "develop",
    "diagnose", "dismantle", "document", "ensure", "establish", "evaluate",
    "execute", "fabricate", "follow", "handle", "identify", "implement",
    "improve", "inspect", "install", "integrate", "interpret", "maintain",
    "manage", "measure", "modify", "monitor", "obtain", "operate", "optimise",
    "optimize", "organise", "organize", "perform", "plan", "prepare", "process",
    "produce", "program", "programme", "record", "repair", "replace", "report",
    "review", "select", "service", "set up", "simulate", "supervise", "test",
    "troubleshoot", "update", "use", "utilise", "validate", "verify",
];

/// Forms the suffix rules cannot produce (e-dropping, doubled consonants,
/// irregular past tense)
pub const VERB_SEEDS: &[(&str, &[&str])] = &[
    ("analyse", &["analysed", "analysing"]),
    ("analyze", &["analyzed", "analyzing"]),
    ("assemble", &["assembled", "assembling"]),
    ("build", &["built"]),
    ("calculate", &["calculated", "calculating"]),
    ("calibrate", &["calibrated", "calibrating"]),
    ("carry out", &["carried out", "carries out", "carrying out"]),
    ("commission", &["commissioned", "commissioning"]),
    ("compile", &["compiled", "compiling"]),
    ("configure", &["configured", "configuring"]),
    ("coordinate", &["coordinated", "coordinating"]),
    ("create", &["created", "creating"]),
    ("determine", &["determined", "determining"]),
    ("diagnose", &["diagnosed", "diagnosing"]),
    ("dismantle", &["dismantled", "dismantling"]),
    ("ensure", &["ensured", "ensuring"]),
    ("evaluate", &["evaluated", "evaluating"]),
    ("execute", &["executed", "executing"]),
    ("fabricate", &["fabricated", "fabricating"]),
    ("improve", &["improved", "improving"]),
    ("integrate", &["integrated", "integrating"]),
    ("interpret", &["interpreted", "interpreting"]),
    ("manage", &["managed", "managing"]),
    ("measure", &["measured", "measuring"]),
    ("operate", &["operated", "operating"]),
    ("optimise", &["optimised", "optimising"]),
    ("optimize", &["optimized", "optimizing"]),
    ("organise", &["organised", "organising"]),
    ("organize", &["organized", "organizing"]),
    ("plan", &["planned", "planning"]),
    ("prepare", &["prepared", "preparing"]),
    ("produce", &["produced", "producing"]),
    ("program", &["programmed", "programming"]),
    ("programme", &["programmed", "programming"]),
    ("replace", &["replaced", "replacing"]),
    ("service", &["serviced", "servicing"]),
    ("set up", &["sets up", "setting up"]),
    ("simulate", &["simulated", "simulating"]),
    ("supervise", &["supervised", "supervising"]),
    ("update", &["updated", "updating"]),
    ("use", &["used", "using"]),
    ("utilise", &["utilised", "utilising"]),
    ("validate", &["validated", "validating"]),
];

lazy_static! {
    // 句読点の後の空白、または改行の連続
    static ref SENTENCE_BREAK: Regex = Regex::new(r"[.!?:;]\s+|\n+").unwrap();
    // 項目区切り " - "
    static ref ITEM_BREAK: Regex = Regex::new(r"\s-\s+").unwrap();
}

/// A sentence or list item: `text` is `field_text[start..start + text.len()]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl Unit<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split a field into gating units (trimmed, empties dropped).
pub fn segment_units(field: Field, text: &str) -> Vec<Unit<'_>> {
    let mut pieces = Vec::new();
    let mut cursor = 0;

    let breaks = if field.is_itemized() {
        &*ITEM_BREAK
    } else {
        &*SENTENCE_BREAK
    };
    for m in breaks.find_iter(text) {
        // 句読点は前の文に残す
        let keep = match text[m.start()..].chars().next() {
            Some(c) if ".!?:;".contains(c) => c.len_utf8(),
            _ => 0,
        };
        pieces.push((cursor, m.start() + keep));
        cursor = m.end();
    }
    pieces.push((cursor, text.len()));

    pieces
        .into_iter()
        .filter_map(|(start, end)| trimmed_unit(text, start, end))
        .collect()
}

fn trimmed_unit(text: &str, start: usize, end: usize) -> Option<Unit<'_>> {
    let raw = &text[start..end];
    let lead = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(Unit {
        start: start + lead,
        text: trimmed,
    })
}

/// Verb-phrase matcher, built like the keyword matcher without taxonomies
#[derive(Debug)]
pub struct VerbMatcher {
    phrases: PhraseMatcher,
}

impl VerbMatcher {
    pub fn build<'a, I>(verbs: I, seeds: &[(&str, &[&str])], engine: EngineKind) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let owned: Vec<(String, Vec<String>)> = verbs
            .into_iter()
            .map(|verb| {
                let forms = seeds
                    .iter()
                    .filter(|(base, _)| *base == verb)
                    .flat_map(|(_, forms)| forms.iter().map(|f| f.to_string()))
                    .collect();
                (verb.to_lowercase(), forms)
            })
            .collect();
        let phrases = PhraseMatcher::build(
            owned.iter().map(|(v, f)| (v.as_str(), f.as_slice())),
            engine,
        )?;
        Ok(Self { phrases })
    }

    pub fn builtin(engine: EngineKind) -> Result<Self> {
        Self::build(DEFAULT_VERBS.iter().copied(), VERB_SEEDS, engine)
    }

    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        self.phrases.find_spans(text)
    }

    pub fn surfaces(&self) -> &[String] {
        self.phrases.surfaces()
    }
}

/// Gating outcome for one unit; span offsets are into the field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedUnit {
    pub start: usize,
    pub end: usize,
    pub qualifies: bool,
    pub keywords: Vec<MatchSpan>,
    pub verbs: Vec<MatchSpan>,
}

/// True iff some verb starts before some keyword
pub fn qualifies(verbs: &[MatchSpan], keywords: &[MatchSpan]) -> bool {
    verbs
        .iter()
        .any(|v| keywords.iter().any(|k| v.start < k.start))
}

/// Match keywords and verbs unit by unit.
pub fn gate_field(
    field: Field,
    text: &str,
    keywords: &KeywordMatcher,
    verbs: &VerbMatcher,
) -> Vec<GatedUnit> {
    segment_units(field, text)
        .into_iter()
        .map(|unit| {
            let keyword_spans = shift(keywords.find_spans(unit.text), unit.start);
            let verb_spans = shift(verbs.find_spans(unit.text), unit.start);
            GatedUnit {
                start: unit.start,
                end: unit.end(),
                qualifies: qualifies(&verb_spans, &keyword_spans),
                keywords: keyword_spans,
                verbs: verb_spans,
            }
        })
        .collect()
}

/// Keyword hits inside qualifying units only
pub fn eligible_spans(units: &[GatedUnit]) -> Vec<MatchSpan> {
    units
        .iter()
        .filter(|u| u.qualifies)
        .flat_map(|u| u.keywords.iter().cloned())
        .collect()
}

fn shift(mut spans: Vec<MatchSpan>, offset: usize) -> Vec<MatchSpan> {
    for span in &mut spans {
        span.start += offset;
        span.end += offset;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Vocabulary;

    fn units(field: Field, text: &str) -> Vec<&str> {
        segment_units(field, text).into_iter().map(|u| u.text).collect()
    }

    fn keyword_matcher(green: &[&str]) -> KeywordMatcher {
        let mut v = Vocabulary::default();
        for b in green {
            v.green.push_base(b);
        }
        KeywordMatcher::build(&v, EngineKind::Regex).unwrap()
    }

    // ============================================
    // Segmentation
    // ============================================

    #[test]
    fn test_sentence_units() {
        assert_eq!(
            units(Field::Descriptor, "Plan works. Monitor waste!  Report:done\nNext line"),
            vec!["Plan works.", "Monitor waste!", "Report:done", "Next line"]
        );
    }

    #[test]
    fn test_sentence_decimal_not_split() {
        assert_eq!(units(Field::Title, "Apply industry 4.0 tools"), vec!["Apply industry 4.0 tools"]);
    }

    #[test]
    fn test_item_units() {
        assert_eq!(
            units(Field::WorkActivity, "Monitor emissions. - Discuss results. -  Record data"),
            vec!["Monitor emissions.", "Discuss results.", "Record data"]
        );
        // 項目区切り以外のハイフンは分割しない
        assert_eq!(units(Field::PerformanceCriteria, "co-generation set up"), vec!["co-generation set up"]);
    }

    #[test]
    fn test_unit_offsets_point_into_text() {
        let text = "  First one.   Second one ";
        for unit in segment_units(Field::Descriptor, text) {
            assert_eq!(&text[unit.start..unit.end()], unit.text);
        }
    }

    #[test]
    fn test_empty_text_has_no_units() {
        assert!(segment_units(Field::Title, "").is_empty());
        assert!(segment_units(Field::WorkActivity, "   ").is_empty());
    }

    // ============================================
    // Verb matcher
    // ============================================

    #[test]
    fn test_builtin_verbs_cover_irregular_forms() {
        let verbs = VerbMatcher::builtin(EngineKind::Regex).unwrap();
        for form in ["prepared", "Preparing", "built", "carried out", "monitors", "applied"] {
            assert_eq!(verbs.find_spans(form).len(), 1, "{form}");
        }
    }

    // ============================================
    // Gate
    // ============================================

    #[test]
    fn test_verb_before_keyword_qualifies() {
        let kw = keyword_matcher(&["emissions"]);
        let verbs = VerbMatcher::builtin(EngineKind::Regex).unwrap();
        let gated = gate_field(
            Field::WorkActivity,
            "Monitor emissions. - Discuss results.",
            &kw,
            &verbs,
        );
        assert_eq!(gated.len(), 2);
        assert!(gated[0].qualifies);
        assert!(!gated[1].qualifies);
        assert_eq!(eligible_spans(&gated).len(), 1);
    }

    #[test]
    fn test_keyword_before_verb_does_not_qualify() {
        let kw = keyword_matcher(&["emissions"]);
        let verbs = VerbMatcher::builtin(EngineKind::Regex).unwrap();
        let gated = gate_field(Field::Title, "Emissions monitored", &kw, &verbs);
        assert!(!gated[0].qualifies);
        assert!(eligible_spans(&gated).is_empty());
    }

    #[test]
    fn test_gate_is_unit_local() {
        let kw = keyword_matcher(&["emissions"]);
        let verbs = VerbMatcher::builtin(EngineKind::Regex).unwrap();
        let gated = gate_field(Field::Descriptor, "Monitor the site. Emissions are low.", &kw, &verbs);
        assert_eq!(gated.len(), 2);
        assert!(gated.iter().all(|u| !u.qualifies));
    }

    #[test]
    fn test_gated_span_offsets_into_field() {
        let text = "Discuss. Monitor emissions";
        let kw = keyword_matcher(&["emissions"]);
        let verbs = VerbMatcher::builtin(EngineKind::Regex).unwrap();
        let spans = eligible_spans(&gate_field(Field::Descriptor, text, &kw, &verbs));
        assert_eq!(&text[spans[0].start..spans[0].end], "emissions");
    }
}
