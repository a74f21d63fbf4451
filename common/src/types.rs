//! Document model shared by the CLI and the scoring engine
//!
//! - Field: the four scored text slots of a competency unit
//! - FieldMap: one value per field (replaces string-keyed dictionaries)
//! - CompetencyUnit / Profile / Document: ingested NOSS content
//! - Taxonomy / MatchSpan: matching output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delimiter used to flatten itemized lists (work activities, performance criteria).
pub const ITEM_DELIMITER: &str = " - ";

/// Scored text slot of a competency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Title,
    Descriptor,
    WorkActivity,
    PerformanceCriteria,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Title,
        Field::Descriptor,
        Field::WorkActivity,
        Field::PerformanceCriteria,
    ];

    /// Label used in source documents and reports
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "CU TITLE",
            Field::Descriptor => "CU DESCRIPTOR",
            Field::WorkActivity => "WORK ACTIVITY",
            Field::PerformanceCriteria => "PERFORMANCE CRITERIA",
        }
    }

    /// Itemized fields are stored as `ITEM_DELIMITER`-joined text.
    pub fn is_itemized(&self) -> bool {
        matches!(self, Field::WorkActivity | Field::PerformanceCriteria)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match key.as_str() {
            "title" | "cu-title" => Ok(Field::Title),
            "descriptor" | "cu-descriptor" | "desc" => Ok(Field::Descriptor),
            "work-activity" | "work-activities" | "wa" => Ok(Field::WorkActivity),
            "performance-criteria" | "pc" => Ok(Field::PerformanceCriteria),
            _ => Err(format!(
                "Unknown field: {}. Use title, descriptor, work-activity or performance-criteria",
                s
            )),
        }
    }
}

/// One value per scored field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMap<T> {
    pub title: T,
    pub descriptor: T,
    pub work_activity: T,
    pub performance_criteria: T,
}

impl<T> FieldMap<T> {
    pub fn new(title: T, descriptor: T, work_activity: T, performance_criteria: T) -> Self {
        Self {
            title,
            descriptor,
            work_activity,
            performance_criteria,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Field) -> T) -> Self {
        Self {
            title: f(Field::Title),
            descriptor: f(Field::Descriptor),
            work_activity: f(Field::WorkActivity),
            performance_criteria: f(Field::PerformanceCriteria),
        }
    }

    pub fn get(&self, field: Field) -> &T {
        match field {
            Field::Title => &self.title,
            Field::Descriptor => &self.descriptor,
            Field::WorkActivity => &self.work_activity,
            Field::PerformanceCriteria => &self.performance_criteria,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut T {
        match field {
            Field::Title => &mut self.title,
            Field::Descriptor => &mut self.descriptor,
            Field::WorkActivity => &mut self.work_activity,
            Field::PerformanceCriteria => &mut self.performance_criteria,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &T)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

impl FieldMap<u32> {
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| *v).sum()
    }
}

/// Controlled vocabulary a base term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Taxonomy {
    GreenTech,
    Ir4,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 2] = [Taxonomy::GreenTech, Taxonomy::Ir4];

    pub fn label(&self) -> &'static str {
        match self {
            Taxonomy::GreenTech => "Green Technology",
            Taxonomy::Ir4 => "Industrial Revolution",
        }
    }

    /// Short prefix used for store files and table columns ("gt" / "ir")
    pub fn prefix(&self) -> &'static str {
        match self {
            Taxonomy::GreenTech => "gt",
            Taxonomy::Ir4 => "ir",
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Taxonomy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gt" | "green" | "green-tech" | "greentech" => Ok(Taxonomy::GreenTech),
            "ir" | "ir4" | "ir4.0" | "industrial-revolution" => Ok(Taxonomy::Ir4),
            _ => Err(format!("Unknown taxonomy: {}. Use gt or ir", s)),
        }
    }
}

/// A keyword occurrence inside one field text.
///
/// Offsets are byte offsets into the exact text instance that was matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub base: String,
    pub surface: String,
}

/// One competency unit (CU) as extracted from a NOSS document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetencyUnit {
    pub code: String,
    pub title: String,
    pub descriptor: String,
    /// Work activities joined with `ITEM_DELIMITER`
    pub work_activity: String,
    /// Performance criteria joined with `ITEM_DELIMITER`
    pub performance_criteria: String,
}

impl CompetencyUnit {
    /// Build a unit from itemized lists; blank items are dropped.
    pub fn from_items<S: AsRef<str>>(
        code: &str,
        title: &str,
        descriptor: &str,
        work_activities: &[S],
        performance_criteria: &[S],
    ) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            descriptor: descriptor.to_string(),
            work_activity: join_items(work_activities),
            performance_criteria: join_items(performance_criteria),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Descriptor => &self.descriptor,
            Field::WorkActivity => &self.work_activity,
            Field::PerformanceCriteria => &self.performance_criteria,
        }
    }

    /// Items of an itemized field (non-itemized fields yield the whole text)
    pub fn items(&self, field: Field) -> Vec<&str> {
        let text = self.field(field);
        if !field.is_itemized() {
            return if text.trim().is_empty() { Vec::new() } else { vec![text.trim()] };
        }
        text.split(ITEM_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn join_items<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(ITEM_DELIMITER)
}

/// NOSS profile: label → value rows from the profile table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub BTreeMap<String, String>);

impl Profile {
    /// Labels shown in report headers
    pub const LABELS: [&'static str; 6] = [
        "SECTION",
        "GROUP",
        "AREA",
        "NOSS CODE",
        "NOSS TITLE",
        "NOSS LEVEL",
    ];

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// An ingested NOSS document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub profile: Profile,
    pub units: Vec<CompetencyUnit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_labels() {
        assert_eq!(Field::Title.label(), "CU TITLE");
        assert_eq!(Field::PerformanceCriteria.to_string(), "PERFORMANCE CRITERIA");
        assert!(Field::WorkActivity.is_itemized());
        assert!(!Field::Descriptor.is_itemized());
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("wa".parse::<Field>(), Ok(Field::WorkActivity));
        assert_eq!("Performance Criteria".parse::<Field>(), Ok(Field::PerformanceCriteria));
        assert_eq!("cu_title".parse::<Field>(), Ok(Field::Title));
        assert!("summary".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_map_access() {
        let mut map = FieldMap::new(5u32, 20, 30, 45);
        assert_eq!(*map.get(Field::Descriptor), 20);
        *map.get_mut(Field::Title) = 10;
        assert_eq!(map.total(), 105);

        let labels: Vec<Field> = map.iter().map(|(f, _)| f).collect();
        assert_eq!(labels, Field::ALL.to_vec());
    }

    #[test]
    fn test_unit_from_items_skips_blank() {
        let cu = CompetencyUnit::from_items(
            "C01",
            "Title",
            "Desc",
            &["Monitor emissions", "  ", "Record data"],
            &["Emissions monitored"],
        );
        assert_eq!(cu.work_activity, "Monitor emissions - Record data");
        assert_eq!(cu.items(Field::WorkActivity), vec!["Monitor emissions", "Record data"]);
        assert_eq!(cu.items(Field::Title), vec!["Title"]);
    }

    #[test]
    fn test_missing_field_is_empty_text() {
        let cu: CompetencyUnit = serde_json::from_str(r#"{"code": "C02"}"#).unwrap();
        assert_eq!(cu.field(Field::Descriptor), "");
        assert!(cu.items(Field::PerformanceCriteria).is_empty());
    }

    #[test]
    fn test_profile_get_default() {
        let mut profile = Profile::default();
        profile.insert("NOSS CODE", "MC-010-3:2020");
        assert_eq!(profile.get("NOSS CODE"), "MC-010-3:2020");
        assert_eq!(profile.get("AREA"), "");
    }

    #[test]
    fn test_taxonomy_from_str() {
        assert_eq!("gt".parse::<Taxonomy>(), Ok(Taxonomy::GreenTech));
        assert_eq!("IR".parse::<Taxonomy>(), Ok(Taxonomy::Ir4));
        assert!("other".parse::<Taxonomy>().is_err());
    }
}
