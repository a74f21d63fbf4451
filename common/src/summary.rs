//! Matched-keyword tables
//!
//! Document-level tally per taxonomy: base → amount, with the most frequent
//! surfaces as examples. Verb-gated fields only contribute hits from
//! qualifying units.

use crate::scoring::{ScoringPolicy, ScoringSession};
use crate::types::{CompetencyUnit, Field, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of surface examples kept per base
pub const MAX_EXAMPLES: usize = 6;

/// One row of a matched-keyword table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTally {
    pub base: String,
    pub amount: u32,
    /// `(surface, count)`, most frequent first
    pub examples: Vec<(String, u32)>,
}

impl KeywordTally {
    /// "surface×count; …" or "—" when there is nothing to show
    pub fn examples_text(&self) -> String {
        if self.examples.is_empty() {
            return "—".to_string();
        }
        self.examples
            .iter()
            .map(|(surface, count)| format!("{}×{}", surface, count))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Matched-keyword tables of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTables {
    pub green: Vec<KeywordTally>,
    pub ir: Vec<KeywordTally>,
}

impl KeywordTables {
    pub fn get(&self, taxonomy: Taxonomy) -> &[KeywordTally] {
        match taxonomy {
            Taxonomy::GreenTech => &self.green,
            Taxonomy::Ir4 => &self.ir,
        }
    }
}

#[derive(Default)]
struct Tally {
    amounts: BTreeMap<String, u32>,
    surfaces: BTreeMap<String, BTreeMap<String, u32>>,
}

impl Tally {
    fn add(&mut self, base: &str, surface: &str) {
        *self.amounts.entry(base.to_string()).or_insert(0) += 1;
        *self
            .surfaces
            .entry(base.to_string())
            .or_default()
            .entry(surface.to_string())
            .or_insert(0) += 1;
    }

    fn into_rows(self) -> Vec<KeywordTally> {
        let Tally {
            amounts,
            mut surfaces,
        } = self;

        let mut rows: Vec<KeywordTally> = amounts
            .into_iter()
            .map(|(base, amount)| {
                let mut examples: Vec<(String, u32)> =
                    surfaces.remove(&base).unwrap_or_default().into_iter().collect();
                examples.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                examples.truncate(MAX_EXAMPLES);
                KeywordTally {
                    base,
                    amount,
                    examples,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.base.cmp(&b.base)));
        rows
    }
}

/// Tally every eligible hit of every field of every CU.
pub fn tally_keywords(
    units: &[CompetencyUnit],
    policy: &ScoringPolicy,
    session: &ScoringSession,
) -> KeywordTables {
    let mut green = Tally::default();
    let mut ir = Tally::default();

    for unit in units {
        for field in Field::ALL {
            for span in session.eligible(field, unit.field(field), policy) {
                if session.keywords.belongs(&span.base, Taxonomy::GreenTech) {
                    green.add(&span.base, &span.surface);
                }
                if session.keywords.belongs(&span.base, Taxonomy::Ir4) {
                    ir.add(&span.base, &span.surface);
                }
            }
        }
    }

    KeywordTables {
        green: green.into_rows(),
        ir: ir.into_rows(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::EngineKind;
    use crate::scoring::CountMode;
    use crate::vocabulary::Vocabulary;

    fn session() -> ScoringSession {
        let mut v = Vocabulary::default();
        v.green.push_base("solar panel");
        v.green.push_base("biogas");
        v.ir.push_base("drone");
        ScoringSession::build(&v, EngineKind::Regex).unwrap()
    }

    fn ungated() -> ScoringPolicy {
        ScoringPolicy::Global {
            count_mode: CountMode::Repeated,
            require_verbs: false,
        }
    }

    #[test]
    fn test_tally_sorted_by_amount_then_base() {
        let cu = CompetencyUnit::from_items(
            "C01",
            "Solar panel and biogas",
            "Biogas, biogases and solar panels",
            &["Fly drone"],
            &["Drone flown"],
        );
        let tables = tally_keywords(&[cu], &ungated(), &session());

        let bases: Vec<&str> = tables.green.iter().map(|t| t.base.as_str()).collect();
        assert_eq!(bases, vec!["biogas", "solar panel"]);
        assert_eq!(tables.green[0].amount, 3);
        assert_eq!(tables.green[0].examples_text(), "biogas×2; biogases×1");
        assert_eq!(tables.ir[0].amount, 2);
    }

    #[test]
    fn test_tally_respects_verb_gate() {
        let cu = CompetencyUnit::from_items("C01", "", "", &["Install solar panel", "Biogas output"], &[]);
        let policy = ScoringPolicy::PerField {
            verb_fields: crate::types::FieldMap::new(false, false, true, false),
        };
        let tables = tally_keywords(&[cu], &policy, &session());
        assert_eq!(tables.green.len(), 1);
        assert_eq!(tables.green[0].base, "solar panel");
    }

    #[test]
    fn test_examples_capped() {
        let mut tally = Tally::default();
        for s in ["a", "b", "c", "d", "e", "f", "g", "a"] {
            tally.add("x", s);
        }
        let rows = tally.into_rows();
        assert_eq!(rows[0].examples.len(), MAX_EXAMPLES);
        assert_eq!(rows[0].examples[0], ("a".to_string(), 2));
    }

    #[test]
    fn test_empty_examples_text() {
        let row = KeywordTally {
            base: "x".into(),
            amount: 0,
            examples: vec![],
        };
        assert_eq!(row.examples_text(), "—");
    }
}
