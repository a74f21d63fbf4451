//! Vocabulary assembly
//!
//! Base-term lists and variant seeds per taxonomy, merged from the built-in
//! defaults and user-added custom keywords. A `Vocabulary` is only read at
//! matcher build time.

pub mod defaults;

use crate::types::Taxonomy;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Canonical identity of a base term: whitespace-collapsed, lowercased.
pub fn normalize_term(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Split user variant input on comma / semicolon / newline.
///
/// Duplicates (by normalized form) are dropped, first spelling wins.
pub fn split_variants(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(normalize_term(p)))
        .map(str::to_string)
        .collect()
}

/// Base terms and seeds of one taxonomy, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTerms {
    bases: Vec<String>,
    seeds: BTreeMap<String, Vec<String>>,
    /// Index of the first custom base, once custom keywords are merged
    custom_start: Option<usize>,
    /// Custom entries with their own variants, in merge order. A key that
    /// repeats a built-in base is listed here too.
    custom: Vec<(String, Vec<String>)>,
}

impl TaxonomyTerms {
    fn from_literals(bases: &[&str], seed_tables: &[&[(&str, &[&str])]]) -> Self {
        let mut terms = Self::default();
        for base in bases {
            terms.push_base(base);
        }
        for table in seed_tables {
            for (base, variants) in table.iter() {
                terms.add_seeds(base, variants.iter().copied());
            }
        }
        terms
    }

    /// Append a base term (ignored if already present or blank)
    pub fn push_base(&mut self, base: &str) {
        let key = normalize_term(base);
        if key.is_empty() || self.bases.contains(&key) {
            return;
        }
        self.bases.push(key);
    }

    /// Append seed variants for a base (the base need not be registered yet)
    pub fn add_seeds<'a>(&mut self, base: &str, variants: impl IntoIterator<Item = &'a str>) {
        let entry = self.seeds.entry(normalize_term(base)).or_default();
        for variant in variants {
            let v = variant.trim().to_lowercase();
            if !v.is_empty() {
                entry.push(v);
            }
        }
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// Built-in bases with their seeds, in registration order
    pub fn builtin_terms(&self) -> impl Iterator<Item = (&str, &[String])> {
        let at = self.custom_start.unwrap_or(self.bases.len());
        self.bases[..at]
            .iter()
            .map(move |base| (base.as_str(), self.seeds_for(base)))
    }

    /// Custom entries with their variants, in merge order
    pub fn custom_terms(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.custom
            .iter()
            .map(|(base, variants)| (base.as_str(), variants.as_slice()))
    }

    /// Built-in seeds of a base
    pub fn seeds_for(&self, base: &str) -> &[String] {
        self.seeds.get(base).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, base: &str) -> bool {
        self.bases.iter().any(|b| b == base)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Append custom keywords after the existing bases
    pub fn merge_custom(&mut self, custom: &CustomKeywords) {
        if self.custom_start.is_none() {
            self.custom_start = Some(self.bases.len());
        }
        for (key, entry) in custom.iter() {
            let base = normalize_term(key);
            if base.is_empty() {
                continue;
            }
            self.push_base(&base);
            let variants = entry
                .variants
                .iter()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect();
            self.custom.push((base, variants));
        }
    }
}

/// Both taxonomies' terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    pub green: TaxonomyTerms,
    pub ir: TaxonomyTerms,
}

impl Vocabulary {
    /// Built-in GreenTech / IR4 vocabulary (English + Bahasa Melayu seeds)
    pub fn builtin() -> Self {
        Self {
            green: TaxonomyTerms::from_literals(
                defaults::GREEN_BASE,
                &[defaults::GREEN_SEEDS, defaults::GREEN_SEEDS_MS],
            ),
            ir: TaxonomyTerms::from_literals(
                defaults::IR_BASE,
                &[defaults::IR_SEEDS, defaults::IR_SEEDS_MS],
            ),
        }
    }

    pub fn terms(&self, taxonomy: Taxonomy) -> &TaxonomyTerms {
        match taxonomy {
            Taxonomy::GreenTech => &self.green,
            Taxonomy::Ir4 => &self.ir,
        }
    }

    pub fn terms_mut(&mut self, taxonomy: Taxonomy) -> &mut TaxonomyTerms {
        match taxonomy {
            Taxonomy::GreenTech => &mut self.green,
            Taxonomy::Ir4 => &mut self.ir,
        }
    }

    /// Merge user-added keywords into one taxonomy
    pub fn with_custom(mut self, taxonomy: Taxonomy, custom: &CustomKeywords) -> Self {
        debug!("merging {} custom {} keywords", custom.len(), taxonomy.prefix());
        self.terms_mut(taxonomy).merge_custom(custom);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.green.is_empty() && self.ir.is_empty()
    }
}

/// A user-added base keyword
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    pub label: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

/// User-added keywords of one taxonomy, keyed by normalized base
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomKeywords {
    entries: BTreeMap<String, CustomEntry>,
}

impl CustomKeywords {
    /// Parse persisted keywords; entries without a usable label are skipped.
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        let mut keywords = Self::default();
        let Some(map) = value.as_object() else {
            debug!("custom keyword data is not an object, ignoring");
            return keywords;
        };

        for (key, raw) in map {
            match serde_json::from_value::<CustomEntry>(raw.clone()) {
                Ok(entry) if !entry.label.trim().is_empty() => {
                    keywords.entries.insert(normalize_term(key), entry);
                }
                Ok(_) => debug!("skipping custom keyword '{}': empty label", key),
                Err(e) => debug!("skipping custom keyword '{}': {}", key, e),
            }
        }
        keywords
    }

    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_json_value(&value))
    }

    pub fn get(&self, key: &str) -> Option<&CustomEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CustomEntry> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: String, entry: CustomEntry) {
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: &str) -> Option<CustomEntry> {
        self.entries.remove(key)
    }

    /// Key of the entry carrying this display label
    pub fn key_for_label(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e.label == label)
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CustomEntry)> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.values().map(|e| e.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
