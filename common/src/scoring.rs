//! Field scoring
//!
//! Converts eligible keyword counts into a bounded score per field and
//! taxonomy:
//!
//! `score = round(weight × min(count / max(threshold, 1), 1))`
//!
//! Rounding is half-to-even. The same formula is used for both taxonomies.

use crate::error::Result;
use crate::matcher::{EngineKind, KeywordMatcher};
use crate::types::{CompetencyUnit, Field, FieldMap, MatchSpan, Taxonomy};
use crate::verbs::{eligible_spans, gate_field, VerbMatcher};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How eligible hits turn into a count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountMode {
    /// Distinct base terms
    #[default]
    Different,
    /// Every occurrence
    Repeated,
}

impl std::fmt::Display for CountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountMode::Different => write!(f, "different"),
            CountMode::Repeated => write!(f, "repeated"),
        }
    }
}

impl std::str::FromStr for CountMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "different" | "distinct" => Ok(CountMode::Different),
            "repeated" | "all" => Ok(CountMode::Repeated),
            _ => Err(format!("Unknown count mode: {}. Use different or repeated", s)),
        }
    }
}

/// Which fields are verb-gated and how hits are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// One counting mode and one verb switch for every field
    #[serde(rename_all = "camelCase")]
    Global {
        count_mode: CountMode,
        require_verbs: bool,
    },
    /// Verb gate per field; counting is always repeated
    #[serde(rename_all = "camelCase")]
    PerField { verb_fields: FieldMap<bool> },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::Global {
            count_mode: CountMode::Different,
            require_verbs: false,
        }
    }
}

impl ScoringPolicy {
    pub fn count_mode(&self) -> CountMode {
        match self {
            ScoringPolicy::Global { count_mode, .. } => *count_mode,
            ScoringPolicy::PerField { .. } => CountMode::Repeated,
        }
    }

    pub fn requires_verbs(&self, field: Field) -> bool {
        match self {
            ScoringPolicy::Global { require_verbs, .. } => *require_verbs,
            ScoringPolicy::PerField { verb_fields } => *verb_fields.get(field),
        }
    }

    /// Whether any field is gated
    pub fn uses_verbs(&self) -> bool {
        Field::ALL.into_iter().any(|f| self.requires_verbs(f))
    }

    /// Short description for reports
    pub fn describe(&self) -> String {
        match self {
            ScoringPolicy::Global {
                count_mode,
                require_verbs,
            } => format!(
                "global ({}, verbs {})",
                count_mode,
                if *require_verbs { "required" } else { "off" }
            ),
            ScoringPolicy::PerField { verb_fields } => {
                let gated: Vec<&str> = verb_fields
                    .iter()
                    .filter(|(_, on)| **on)
                    .map(|(f, _)| f.label())
                    .collect();
                if gated.is_empty() {
                    "per-field (repeated, no verb fields)".to_string()
                } else {
                    format!("per-field (repeated, verbs: {})", gated.join(", "))
                }
            }
        }
    }
}

/// Weights, quotas and pass thresholds for one scoring run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSettings {
    pub weights: FieldMap<u32>,
    /// Count needed for full credit; values ≤ 0 behave as 1
    pub thresholds: FieldMap<i32>,
    pub policy: ScoringPolicy,
    /// CU total needed to pass (per taxonomy)
    pub pass_threshold: u32,
    /// Share of passing CUs (percent) needed for a document category
    pub share_threshold: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: FieldMap::new(5, 20, 30, 45),
            thresholds: FieldMap::new(1, 3, 3, 3),
            policy: ScoringPolicy::default(),
            pass_threshold: 50,
            share_threshold: 50,
        }
    }
}

/// Score of one field for one taxonomy
pub fn field_score(count: u32, weight: u32, threshold: i32) -> u32 {
    let quota = f64::from(threshold.max(1));
    let ratio = (f64::from(count) / quota).min(1.0);
    (f64::from(weight) * ratio).round_ties_even() as u32
}

/// Immutable matchers shared by every scoring call of a run
#[derive(Debug)]
pub struct ScoringSession {
    pub keywords: KeywordMatcher,
    pub verbs: VerbMatcher,
}

impl ScoringSession {
    pub fn new(keywords: KeywordMatcher, verbs: VerbMatcher) -> Self {
        Self { keywords, verbs }
    }

    /// Session over a vocabulary with the built-in verb list
    pub fn build(vocabulary: &Vocabulary, engine: EngineKind) -> Result<Self> {
        Ok(Self {
            keywords: KeywordMatcher::build(vocabulary, engine)?,
            verbs: VerbMatcher::builtin(engine)?,
        })
    }

    /// Keyword hits of a field that count under the policy
    pub fn eligible(&self, field: Field, text: &str, policy: &ScoringPolicy) -> Vec<MatchSpan> {
        if policy.requires_verbs(field) {
            eligible_spans(&gate_field(field, text, &self.keywords, &self.verbs))
        } else {
            self.keywords.find_spans(text)
        }
    }

    /// Count of eligible hits belonging to `taxonomy`
    pub fn count(&self, spans: &[MatchSpan], taxonomy: Taxonomy, mode: CountMode) -> u32 {
        let hits = spans
            .iter()
            .filter(|s| self.keywords.belongs(&s.base, taxonomy));
        match mode {
            CountMode::Repeated => hits.count() as u32,
            CountMode::Different => hits.map(|s| s.base.as_str()).collect::<HashSet<_>>().len() as u32,
        }
    }

    /// Score all four fields of a CU
    pub fn score_unit(&self, unit: &CompetencyUnit, settings: &ScoringSettings) -> UnitScore {
        let mode = settings.policy.count_mode();
        let mut score = UnitScore::default();

        for field in Field::ALL {
            let spans = self.eligible(field, unit.field(field), &settings.policy);
            let weight = *settings.weights.get(field);
            let threshold = *settings.thresholds.get(field);

            let green = self.count(&spans, Taxonomy::GreenTech, mode);
            let ir = self.count(&spans, Taxonomy::Ir4, mode);

            *score.green_counts.get_mut(field) = green;
            *score.ir_counts.get_mut(field) = ir;
            *score.green.get_mut(field) = field_score(green, weight, threshold);
            *score.ir.get_mut(field) = field_score(ir, weight, threshold);
        }
        score
    }
}

/// Per-field scores and eligible counts of one CU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitScore {
    pub green: FieldMap<u32>,
    pub ir: FieldMap<u32>,
    pub green_counts: FieldMap<u32>,
    pub ir_counts: FieldMap<u32>,
}

impl UnitScore {
    pub fn scores(&self, taxonomy: Taxonomy) -> &FieldMap<u32> {
        match taxonomy {
            Taxonomy::GreenTech => &self.green,
            Taxonomy::Ir4 => &self.ir,
        }
    }

    pub fn total(&self, taxonomy: Taxonomy) -> u32 {
        self.scores(taxonomy).total()
    }
}
