//! Manually entered documents (JSON)
//!
//! ```json
//! {
//!   "profile": { "NOSS CODE": "MC-010-3:2020", "NOSS TITLE": "..." },
//!   "units": [
//!     { "code": "C01", "title": "...", "descriptor": "...",
//!       "workActivities": ["..."], "performanceCriteria": ["..."] }
//!   ]
//! }
//! ```

use crate::error::Result;
use cu_analyzer_common::{CompetencyUnit, Document, Profile};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ManualUnit {
    code: String,
    title: String,
    #[serde(alias = "desc")]
    descriptor: String,
    #[serde(alias = "wa")]
    work_activities: Vec<String>,
    #[serde(alias = "pc")]
    performance_criteria: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManualDocument {
    profile: BTreeMap<String, String>,
    units: Vec<ManualUnit>,
}

/// Parse a manual-entry JSON document. Blank WA/PC items are dropped.
pub fn parse_manual_json(json: &str) -> Result<Document> {
    let manual: ManualDocument = serde_json::from_str(json)?;

    let units = manual
        .units
        .into_iter()
        .map(|u| {
            CompetencyUnit::from_items(
                &u.code,
                &u.title,
                &u.descriptor,
                &u.work_activities,
                &u.performance_criteria,
            )
        })
        .collect();

    Ok(Document {
        profile: Profile(manual.profile),
        units,
    })
}
