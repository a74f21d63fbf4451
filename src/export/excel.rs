//! Excel生成（CLI版）
//!
//! 共通ライブラリの `generate_score_sheet_buffer` でワークブックを生成して保存

use crate::analyzer::DocumentReport;
use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::export::excel_core::{generate_score_sheet_buffer, ScoreSheet};
use std::path::Path;

pub fn generate_excel(report: &DocumentReport, output_path: &Path) -> Result<()> {
    let sheet = ScoreSheet {
        profile: &report.profile,
        units: &report.units,
        summary: &report.summary,
        keywords: &report.keywords,
        pass_threshold: report.settings.pass_threshold,
    };

    let buffer = generate_score_sheet_buffer(&sheet).map_err(CuAnalyzerError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)
        .map_err(|e| CuAnalyzerError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}
