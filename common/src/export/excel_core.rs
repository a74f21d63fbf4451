//! Excel生成（共通ライブラリ）
//!
//! CUスコア表を生成する。シート構成:
//! - Summary: profile, CU totals, document share, category
//! - Scores: per-field scores of every CU
//! - Keywords GT / Keywords IR: matched-keyword tables

use crate::aggregate::DocumentSummary;
use crate::summary::{KeywordTables, KeywordTally};
use crate::types::{Field, FieldMap, Profile, Taxonomy};
use rust_xlsxwriter::*;

/// Scored CU row (implemented by the report types of the callers)
pub trait ScoreRow {
    fn code(&self) -> &str;
    fn title(&self) -> &str;
    fn scores(&self, taxonomy: Taxonomy) -> &FieldMap<u32>;

    fn total(&self, taxonomy: Taxonomy) -> u32 {
        self.scores(taxonomy).total()
    }
}

/// Everything the workbook shows
pub struct ScoreSheet<'a, T: ScoreRow> {
    pub profile: &'a Profile,
    pub units: &'a [T],
    pub summary: &'a DocumentSummary,
    pub keywords: &'a KeywordTables,
    pub pass_threshold: u32,
}

struct Formats {
    header: Format,
    label: Format,
    value: Format,
    number: Format,
    percent: Format,
}

impl Formats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_size(10.0)
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x2F5597))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(0xAAAAAA));

        let label = Format::new()
            .set_bold()
            .set_font_size(9.0)
            .set_font_color(Color::RGB(0x555555))
            .set_background_color(Color::RGB(0xF5F5F5))
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xAAAAAA));

        let value = Format::new()
            .set_font_size(10.0)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xCCCCCC));

        let number = Format::new()
            .set_font_size(10.0)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xCCCCCC));

        let percent = number.clone().set_num_format("0\"%\"");

        Self {
            header,
            label,
            value,
            number,
            percent,
        }
    }
}

fn write_header(sheet: &mut Worksheet, row: u32, headers: &[&str], format: &Format) -> Result<(), String> {
    for (col, text) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, *text, format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    Ok(())
}

fn write_summary<T: ScoreRow>(sheet: &mut Worksheet, data: &ScoreSheet<'_, T>, f: &Formats) -> Result<(), String> {
    sheet.set_name("Summary").map_err(|e| format!("シート名設定エラー: {}", e))?;
    sheet
        .set_column_width(0, 24)
        .and_then(|s| s.set_column_width(1, 48))
        .and_then(|s| s.set_column_width(2, 22))
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    let mut row: u32 = 0;
    for label in Profile::LABELS {
        sheet
            .write_string_with_format(row, 0, label, &f.label)
            .and_then(|s| s.write_string_with_format(row, 1, data.profile.get(label), &f.value))
            .map_err(|e| format!("プロファイル書き込みエラー: {}", e))?;
        row += 1;
    }

    row += 1;
    write_header(sheet, row, &["CU", "Green Technology", "Industrial Revolution"], &f.header)?;
    row += 1;
    for (i, unit) in data.units.iter().enumerate() {
        let name = if unit.code().is_empty() {
            format!("CU {}", i + 1)
        } else {
            format!("CU {} ({})", i + 1, unit.code())
        };
        sheet
            .write_string_with_format(row, 0, &name, &f.label)
            .and_then(|s| s.write_number_with_format(row, 1, unit.total(Taxonomy::GreenTech), &f.percent))
            .and_then(|s| s.write_number_with_format(row, 2, unit.total(Taxonomy::Ir4), &f.percent))
            .map_err(|e| format!("CU集計書き込みエラー: {}", e))?;
        row += 1;
    }

    row += 1;
    let pass = data.pass_threshold;
    write_header(sheet, row, &["Metric", "Value", "Total CU", "Percent"], &f.header)?;
    row += 1;
    let shares = [
        (format!("IR ≥ {}% CU", pass), data.summary.ir_pass, data.summary.ir_percent),
        (format!("GT ≥ {}% CU", pass), data.summary.green_pass, data.summary.green_percent),
    ];
    for (metric, count, percent) in shares {
        sheet
            .write_string_with_format(row, 0, &metric, &f.label)
            .and_then(|s| s.write_number_with_format(row, 1, count as f64, &f.number))
            .and_then(|s| s.write_number_with_format(row, 2, data.summary.total_units as f64, &f.number))
            .and_then(|s| s.write_number_with_format(row, 3, percent.round(), &f.percent))
            .map_err(|e| format!("割合書き込みエラー: {}", e))?;
        row += 1;
    }

    row += 1;
    sheet
        .write_string_with_format(row, 0, "Category", &f.label)
        .and_then(|s| s.write_string_with_format(row, 1, data.summary.category.label(), &f.value))
        .map_err(|e| format!("カテゴリ書き込みエラー: {}", e))?;
    Ok(())
}

fn write_scores<T: ScoreRow>(sheet: &mut Worksheet, data: &ScoreSheet<'_, T>, f: &Formats) -> Result<(), String> {
    sheet.set_name("Scores").map_err(|e| format!("シート名設定エラー: {}", e))?;

    let mut headers = vec!["CU CODE".to_string(), "CU TITLE".to_string()];
    for taxonomy in Taxonomy::ALL {
        for field in Field::ALL {
            headers.push(format!("{} {}", taxonomy.prefix().to_uppercase(), field.label()));
        }
        headers.push(format!("{} TOTAL", taxonomy.prefix().to_uppercase()));
    }
    let header_refs: Vec<&str> = headers.iter().map(|s| s.as_str()).collect();
    write_header(sheet, 0, &header_refs, &f.header)?;

    sheet
        .set_column_width(0, 14)
        .and_then(|s| s.set_column_width(1, 40))
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    for (i, unit) in data.units.iter().enumerate() {
        let row = i as u32 + 1;
        sheet
            .write_string_with_format(row, 0, unit.code(), &f.value)
            .and_then(|s| s.write_string_with_format(row, 1, unit.title(), &f.value))
            .map_err(|e| format!("スコア書き込みエラー: {}", e))?;

        let mut col: u16 = 2;
        for taxonomy in Taxonomy::ALL {
            for (_, score) in unit.scores(taxonomy).iter() {
                sheet
                    .write_number_with_format(row, col, *score, &f.number)
                    .map_err(|e| format!("スコア書き込みエラー: {}", e))?;
                col += 1;
            }
            sheet
                .write_number_with_format(row, col, unit.total(taxonomy), &f.number)
                .map_err(|e| format!("スコア書き込みエラー: {}", e))?;
            col += 1;
        }
    }
    Ok(())
}

fn write_keywords(sheet: &mut Worksheet, name: &str, rows: &[KeywordTally], f: &Formats) -> Result<(), String> {
    sheet.set_name(name).map_err(|e| format!("シート名設定エラー: {}", e))?;
    sheet
        .set_column_width(0, 36)
        .and_then(|s| s.set_column_width(1, 60))
        .and_then(|s| s.set_column_width(2, 10))
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    write_header(sheet, 0, &["Keywords", "Variants", "Amount"], &f.header)?;

    for (i, tally) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet
            .write_string_with_format(row, 0, &tally.base, &f.value)
            .and_then(|s| s.write_string_with_format(row, 1, tally.examples_text(), &f.value))
            .and_then(|s| s.write_number_with_format(row, 2, tally.amount, &f.number))
            .map_err(|e| format!("キーワード書き込みエラー: {}", e))?;
    }
    Ok(())
}

/// Excelをバッファに生成
pub fn generate_score_sheet_buffer<T: ScoreRow>(data: &ScoreSheet<'_, T>) -> Result<Vec<u8>, String> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    write_summary(workbook.add_worksheet(), data, &formats)?;
    write_scores(workbook.add_worksheet(), data, &formats)?;
    write_keywords(workbook.add_worksheet(), "Keywords GT", &data.keywords.green, &formats)?;
    write_keywords(workbook.add_worksheet(), "Keywords IR", &data.keywords.ir, &formats)?;

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
