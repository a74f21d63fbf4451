//! Document aggregation: per-CU totals → pass counts → category

use serde::{Deserialize, Serialize};

/// Document-level category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Combined,
    GreenTech,
    Ir4,
    /// At least one CU passed, but neither share reached the cutoff
    Partial,
    Unmatched,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Combined => "IR4.0 + GREEN TECHNOLOGY",
            Category::GreenTech => "GREEN TECHNOLOGY",
            Category::Ir4 => "IR4.0",
            Category::Partial => "MATCHED LESS 50%",
            Category::Unmatched => "UNMATCHED",
        }
    }

    /// Decide from the two pass shares (percent) and pass counts.
    pub fn decide(
        green_percent: f64,
        ir_percent: f64,
        green_pass: usize,
        ir_pass: usize,
        share_threshold: f64,
    ) -> Self {
        let green_ok = green_percent >= share_threshold;
        let ir_ok = ir_percent >= share_threshold;
        match (green_ok, ir_ok) {
            (true, true) => Category::Combined,
            (true, false) => Category::GreenTech,
            (false, true) => Category::Ir4,
            (false, false) if green_pass > 0 || ir_pass > 0 => Category::Partial,
            (false, false) => Category::Unmatched,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-taxonomy totals of one CU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTotals {
    pub green: u32,
    pub ir: u32,
}

/// Aggregated outcome for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub total_units: usize,
    pub green_pass: usize,
    pub ir_pass: usize,
    pub green_percent: f64,
    pub ir_percent: f64,
    pub category: Category,
}

/// Count CUs at or above `pass_threshold` and derive the category.
///
/// A document without CUs has 0% shares and is `Unmatched`.
pub fn aggregate(totals: &[UnitTotals], pass_threshold: u32, share_threshold: u32) -> DocumentSummary {
    let total_units = totals.len();
    let green_pass = totals.iter().filter(|t| t.green >= pass_threshold).count();
    let ir_pass = totals.iter().filter(|t| t.ir >= pass_threshold).count();

    let percent = |passed: usize| {
        if total_units == 0 {
            0.0
        } else {
            passed as f64 / total_units as f64 * 100.0
        }
    };
    let green_percent = percent(green_pass);
    let ir_percent = percent(ir_pass);

    DocumentSummary {
        total_units,
        green_pass,
        ir_pass,
        green_percent,
        ir_percent,
        category: Category::decide(
            green_percent,
            ir_percent,
            green_pass,
            ir_pass,
            f64::from(share_threshold),
        ),
    }
}
