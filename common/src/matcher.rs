//! Keyword matcher
//!
//! Builds one multi-pattern matcher over every surface variant of a term list
//! and reports occurrences as [`MatchSpan`]s.
//!
//! - `PhraseMatcher`: surface set + surface→base lookup + a [`PatternEngine`]
//! - `KeywordMatcher`: a `PhraseMatcher` over both taxonomies plus the two
//!   base sets used to classify a hit
//!
//! Two engines sit behind `PatternEngine`:
//! - `RegexEngine` (default): case-insensitive alternation, longest surface first
//! - `AhoCorasickEngine`: automaton over the same surfaces, ASCII case folding

use crate::error::Result;
use crate::types::{MatchSpan, Taxonomy};
use crate::variants::expand_phrase;
use crate::vocabulary::Vocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::Range;

/// Compile limits for large alternations (the default 10MB is too small
/// for the full vocabulary with case folding).
const REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);
const REGEX_DFA_SIZE_LIMIT: usize = 64 * (1 << 20);

lazy_static! {
    static ref WORD_CHAR: Regex = Regex::new(r"^\w$").unwrap();
}

/// Word character for boundary checks: Unicode `\w`, combining marks included
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// True when `text[start..end]` is not glued to a word character on either side.
fn at_word_edges(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

// ============================================
// Engines
// ============================================

/// Finds whole-word occurrences of a fixed surface set.
///
/// Returned ranges are byte offsets into `text`, ascending and
/// non-overlapping. Must not fail on any input.
pub trait PatternEngine: Send + Sync + std::fmt::Debug {
    fn find(&self, text: &str) -> Vec<Range<usize>>;
}

/// Matching engine selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    #[default]
    Regex,
    AhoCorasick,
}

impl EngineKind {
    /// Build an engine over surfaces already sorted longest-first
    pub fn build(self, surfaces: &[String]) -> Result<Box<dyn PatternEngine>> {
        Ok(match self {
            EngineKind::Regex => Box::new(RegexEngine::new(surfaces)?),
            EngineKind::AhoCorasick => Box::new(AhoCorasickEngine::new(surfaces)?),
        })
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Regex => write!(f, "regex"),
            EngineKind::AhoCorasick => write!(f, "aho-corasick"),
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regex" => Ok(EngineKind::Regex),
            "aho-corasick" | "aho" | "ac" => Ok(EngineKind::AhoCorasick),
            _ => Err(format!("Unknown engine: {}. Use regex or aho-corasick", s)),
        }
    }
}

/// Alternation of all surfaces, compiled case-insensitive.
///
/// Runs on the original text so returned offsets never shift. `\b` is only
/// emitted on edges that are word characters; other edges are verified after
/// the match.
#[derive(Debug)]
pub struct RegexEngine {
    regex: Option<Regex>,
}

impl RegexEngine {
    pub fn new(surfaces: &[String]) -> Result<Self> {
        if surfaces.is_empty() {
            return Ok(Self { regex: None });
        }

        let alternation = surfaces
            .iter()
            .map(|s| anchored_alternative(s))
            .collect::<Vec<_>>()
            .join("|");

        let regex = RegexBuilder::new(&format!("(?:{})", alternation))
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(REGEX_DFA_SIZE_LIMIT)
            .build()?;

        Ok(Self { regex: Some(regex) })
    }
}

fn anchored_alternative(surface: &str) -> String {
    let lead = surface.chars().next().is_some_and(is_word_char);
    let trail = surface.chars().next_back().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if lead { r"\b" } else { "" },
        regex::escape(surface),
        if trail { r"\b" } else { "" }
    )
}

impl PatternEngine for RegexEngine {
    fn find(&self, text: &str) -> Vec<Range<usize>> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };
        regex
            .find_iter(text)
            .filter(|m| at_word_edges(text, m.start(), m.end()))
            .map(|m| m.range())
            .collect()
    }
}

/// Aho-Corasick automaton over all surfaces.
///
/// Every overlapping candidate is collected, filtered by word edges, then
/// selected greedily: leftmost start first, longest candidate at a start.
/// Case folding is ASCII only.
#[derive(Debug)]
pub struct AhoCorasickEngine {
    automaton: Option<AhoCorasick>,
}

impl AhoCorasickEngine {
    pub fn new(surfaces: &[String]) -> Result<Self> {
        if surfaces.is_empty() {
            return Ok(Self { automaton: None });
        }
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(true)
            .build(surfaces)?;
        Ok(Self {
            automaton: Some(automaton),
        })
    }
}

impl PatternEngine for AhoCorasickEngine {
    fn find(&self, text: &str) -> Vec<Range<usize>> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        let mut candidates: Vec<Range<usize>> = automaton
            .find_overlapping_iter(text)
            .map(|m| m.range())
            .filter(|r| at_word_edges(text, r.start, r.end))
            .collect();
        candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut selected = Vec::new();
        let mut cursor = 0;
        for range in candidates {
            if range.start >= cursor {
                cursor = range.end;
                selected.push(range);
            }
        }
        selected
    }
}

// ============================================
// PhraseMatcher
// ============================================

/// Two bases claimed the same surface; `winner` was registered later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceConflict {
    pub surface: String,
    pub previous: String,
    pub winner: String,
}

/// Surface variants of a list of base terms behind one engine
#[derive(Debug)]
pub struct PhraseMatcher {
    engine: Box<dyn PatternEngine>,
    surfaces: Vec<String>,
    surface_to_base: HashMap<String, String>,
    conflicts: Vec<SurfaceConflict>,
}

impl PhraseMatcher {
    /// Build from `(base, seeds)` pairs in registration order.
    ///
    /// Every surface maps to exactly one base. When two bases produce the same
    /// surface the later one wins and the collision is recorded.
    pub fn build<'a, I>(terms: I, engine: EngineKind) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut surface_to_base: HashMap<String, String> = HashMap::new();
        let mut conflicts = Vec::new();

        for (base, seeds) in terms {
            for surface in surface_set(base, seeds) {
                if let Some(previous) = surface_to_base.insert(surface.clone(), base.to_string()) {
                    if previous != base {
                        conflicts.push(SurfaceConflict {
                            surface,
                            previous,
                            winner: base.to_string(),
                        });
                    }
                }
            }
        }

        for c in &conflicts {
            debug!(
                "surface '{}' reassigned from '{}' to '{}'",
                c.surface, c.previous, c.winner
            );
        }

        let mut surfaces: Vec<String> = surface_to_base.keys().cloned().collect();
        surfaces.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let engine_impl = engine.build(&surfaces)?;
        debug!(
            "{} engine built over {} surfaces ({} conflicts)",
            engine,
            surfaces.len(),
            conflicts.len()
        );

        Ok(Self {
            engine: engine_impl,
            surfaces,
            surface_to_base,
            conflicts,
        })
    }

    /// Occurrences in `text`, ordered by position.
    ///
    /// Matched text is lowercased for the lookup; hits without a base are dropped.
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        if text.is_empty() {
            return Vec::new();
        }
        self.engine
            .find(text)
            .into_iter()
            .filter_map(|range| {
                let surface = text[range.clone()].to_lowercase();
                let base = self.surface_to_base.get(&surface)?;
                Some(MatchSpan {
                    start: range.start,
                    end: range.end,
                    base: base.clone(),
                    surface,
                })
            })
            .collect()
    }

    pub fn base_of(&self, surface: &str) -> Option<&str> {
        self.surface_to_base.get(surface).map(|s| s.as_str())
    }

    /// All surfaces, longest first
    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }

    pub fn conflicts(&self) -> &[SurfaceConflict] {
        &self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Surfaces of one base: every element of `{base} ∪ seeds`, expanded, plus
/// each seed verbatim.
fn surface_set(base: &str, seeds: &[String]) -> BTreeSet<String> {
    let mut out = expand_phrase(base);
    out.insert(base.to_string());
    for seed in seeds {
        let seed = seed.trim().to_lowercase();
        if seed.is_empty() {
            continue;
        }
        out.extend(expand_phrase(&seed));
        out.insert(seed);
    }
    out
}

// ============================================
// KeywordMatcher
// ============================================

/// Occurrences in one field text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatches {
    pub spans: Vec<MatchSpan>,
    /// Every occurrence counted, keyed by base
    pub per_base: BTreeMap<String, u32>,
}

/// Matcher over both taxonomies
#[derive(Debug)]
pub struct KeywordMatcher {
    phrases: PhraseMatcher,
    green: HashSet<String>,
    ir: HashSet<String>,
}

impl KeywordMatcher {
    /// Registration order: GreenTech built-ins, IR4 built-ins, then the
    /// custom bases of both taxonomies in the same order.
    pub fn build(vocabulary: &Vocabulary, engine: EngineKind) -> Result<Self> {
        let builtin = Taxonomy::ALL
            .into_iter()
            .flat_map(move |taxonomy| vocabulary.terms(taxonomy).builtin_terms());
        let custom = Taxonomy::ALL
            .into_iter()
            .flat_map(move |taxonomy| vocabulary.terms(taxonomy).custom_terms());
        let terms = builtin.chain(custom);
        let phrases = PhraseMatcher::build(terms, engine)?;

        Ok(Self {
            phrases,
            green: vocabulary.green.bases().iter().cloned().collect(),
            ir: vocabulary.ir.bases().iter().cloned().collect(),
        })
    }

    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        self.phrases.find_spans(text)
    }

    pub fn count(&self, text: &str) -> FieldMatches {
        let spans = self.find_spans(text);
        let mut per_base = BTreeMap::new();
        for span in &spans {
            *per_base.entry(span.base.clone()).or_insert(0) += 1;
        }
        FieldMatches { spans, per_base }
    }

    /// Whether `base` belongs to `taxonomy` (a base may belong to both)
    pub fn belongs(&self, base: &str, taxonomy: Taxonomy) -> bool {
        match taxonomy {
            Taxonomy::GreenTech => self.green.contains(base),
            Taxonomy::Ir4 => self.ir.contains(base),
        }
    }

    pub fn taxonomies_of(&self, base: &str) -> Vec<Taxonomy> {
        Taxonomy::ALL
            .into_iter()
            .filter(|t| self.belongs(base, *t))
            .collect()
    }

    pub fn base_set(&self, taxonomy: Taxonomy) -> &HashSet<String> {
        match taxonomy {
            Taxonomy::GreenTech => &self.green,
            Taxonomy::Ir4 => &self.ir,
        }
    }

    pub fn base_of(&self, surface: &str) -> Option<&str> {
        self.phrases.base_of(surface)
    }

    pub fn surfaces(&self) -> &[String] {
        self.phrases.surfaces()
    }

    pub fn conflicts(&self) -> &[SurfaceConflict] {
        self.phrases.conflicts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{CustomEntry, CustomKeywords};

    fn vocab(green: &[&str], ir: &[&str]) -> Vocabulary {
        let mut v = Vocabulary::default();
        for b in green {
            v.green.push_base(b);
        }
        for b in ir {
            v.ir.push_base(b);
        }
        v
    }

    fn both_engines() -> [EngineKind; 2] {
        [EngineKind::Regex, EngineKind::AhoCorasick]
    }

    // ============================================
    // Engines
    // ============================================

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        for engine in both_engines() {
            let m = KeywordMatcher::build(&Vocabulary::default(), engine).unwrap();
            assert!(m.find_spans("green technology everywhere").is_empty());
            assert!(m.surfaces().is_empty());
        }
    }

    #[test]
    fn test_longest_surface_wins() {
        let v = vocab(&["solar", "solar panel"], &[]);
        for engine in both_engines() {
            let m = KeywordMatcher::build(&v, engine).unwrap();
            let spans = m.find_spans("Install Solar Panels today");
            assert_eq!(spans.len(), 1, "{engine}");
            assert_eq!(spans[0].base, "solar panel");
            assert_eq!(spans[0].surface, "solar panels");
            assert_eq!(&"Install Solar Panels today"[spans[0].start..spans[0].end], "Solar Panels");
        }
    }

    #[test]
    fn test_word_boundary() {
        let v = vocab(&["energy"], &[]);
        for engine in both_engines() {
            let m = KeywordMatcher::build(&v, engine).unwrap();
            assert!(m.find_spans("energize the grid").is_empty(), "{engine}");
            assert!(m.find_spans("synergy").is_empty(), "{engine}");
            assert_eq!(m.find_spans("save energy, now").len(), 1, "{engine}");
        }
    }

    #[test]
    fn test_engines_agree_on_combining_mark_edges() {
        assert!(is_word_char('\u{301}'));
        assert!(is_word_char('é'));
        assert!(!is_word_char('-'));

        let v = vocab(&["energy"], &[]);
        for engine in both_engines() {
            let m = KeywordMatcher::build(&v, engine).unwrap();
            assert!(m.find_spans("\u{301}energy\u{301}").is_empty(), "{}", engine);
            assert_eq!(m.find_spans("energy\u{301}").len(), 0, "{}", engine);
            assert_eq!(m.find_spans("(energy)").len(), 1, "{}", engine);
        }
    }

    #[test]
    fn test_non_word_edge_surface() {
        let mut v = vocab(&["industry 4.0"], &[]);
        v.green.add_seeds("industry 4.0", ["ir4.0+"]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        assert_eq!(m.find_spans("adopt IR4.0+ now").len(), 1);
        assert!(m.find_spans("adopt IR4.0+x now").is_empty());
    }

    #[test]
    fn test_offsets_against_original_text() {
        let text = "Café owners apply GREEN TECHNOLOGY";
        let v = vocab(&["green technology"], &[]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        let spans = m.find_spans(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "GREEN TECHNOLOGY");
    }

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("regex".parse::<EngineKind>(), Ok(EngineKind::Regex));
        assert_eq!("Aho-Corasick".parse::<EngineKind>(), Ok(EngineKind::AhoCorasick));
        assert!("pcre".parse::<EngineKind>().is_err());
    }

    // ============================================
    // Builder
    // ============================================

    #[test]
    fn test_surfaces_sorted_longest_first() {
        let v = vocab(&["iot", "internet of things"], &[]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        let lens: Vec<usize> = m.surfaces().iter().map(|s| s.chars().count()).collect();
        let mut sorted = lens.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lens, sorted);
    }

    #[test]
    fn test_seeds_map_to_base() {
        let mut v = vocab(&[], &["internet of things"]);
        v.ir.add_seeds("internet of things", ["iot"]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        assert_eq!(m.base_of("iot"), Some("internet of things"));
        assert_eq!(m.base_of("iots"), Some("internet of things"));
        assert_eq!(m.base_of("internet-of-things"), Some("internet of things"));
    }

    #[test]
    fn test_last_registered_base_owns_shared_surface() {
        let mut v = vocab(&["smart sensor"], &["internet of things"]);
        v.green.add_seeds("smart sensor", ["iot"]);
        v.ir.add_seeds("internet of things", ["iot"]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();

        assert_eq!(m.base_of("iot"), Some("internet of things"));
        assert!(m.conflicts().iter().any(|c| c.surface == "iot"
            && c.previous == "smart sensor"
            && c.winner == "internet of things"));
    }

    #[test]
    fn test_custom_keyword_owns_shared_surface() {
        let mut custom = CustomKeywords::default();
        custom.insert(
            "connected devices".into(),
            CustomEntry {
                label: "Connected Devices".into(),
                variants: vec!["iot".into()],
            },
        );
        let v = Vocabulary::builtin().with_custom(Taxonomy::Ir4, &custom);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        assert_eq!(m.base_of("iot"), Some("connected devices"));
    }

    #[test]
    fn test_green_custom_registered_after_ir_builtins() {
        let mut custom = CustomKeywords::default();
        custom.insert(
            "smart sensing".into(),
            CustomEntry {
                label: "Smart Sensing".into(),
                variants: vec!["iot".into()],
            },
        );
        let v = Vocabulary::builtin().with_custom(Taxonomy::GreenTech, &custom);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        assert_eq!(m.base_of("iot"), Some("smart sensing"));
        assert!(m.belongs("smart sensing", Taxonomy::GreenTech));
    }

    #[test]
    fn test_custom_entry_on_builtin_base_owns_its_variants() {
        // hand-edited store: the custom key repeats a built-in GreenTech base
        let mut custom = CustomKeywords::default();
        custom.insert(
            "Smart Farming".into(),
            CustomEntry {
                label: "Smart Farming".into(),
                variants: vec!["IoT".into()],
            },
        );
        let v = vocab(&["smart farming"], &["iot"]).with_custom(Taxonomy::GreenTech, &custom);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();

        assert_eq!(m.base_of("iot"), Some("smart farming"));
        assert!(m.belongs("smart farming", Taxonomy::GreenTech));
        assert!(!m.belongs("smart farming", Taxonomy::Ir4));
    }

    #[test]
    fn test_shared_base_belongs_to_both() {
        let v = vocab(&["internet of things"], &["internet of things"]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        assert_eq!(
            m.taxonomies_of("internet of things"),
            vec![Taxonomy::GreenTech, Taxonomy::Ir4]
        );
        assert!(m.conflicts().is_empty());
    }

    #[test]
    fn test_count_repeated_occurrences() {
        let v = vocab(&["biogas"], &[]);
        let m = KeywordMatcher::build(&v, EngineKind::Regex).unwrap();
        let matches = m.count("Biogas plant. biogas storage, BIOGASES");
        assert_eq!(matches.spans.len(), 3);
        assert_eq!(matches.per_base.get("biogas"), Some(&3));
    }

    #[test]
    fn test_builtin_vocabulary_compiles() {
        let v = Vocabulary::builtin();
        for engine in both_engines() {
            let m = KeywordMatcher::build(&v, engine).unwrap();
            let spans = m.find_spans("Apply green technology and machine learning");
            let bases: Vec<&str> = spans.iter().map(|s| s.base.as_str()).collect();
            assert_eq!(bases, vec!["green technology", "machine learning"], "{engine}");
        }
    }
}
