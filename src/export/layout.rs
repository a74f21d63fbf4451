//! レイアウト設定モジュール
//!
//! mm基準のA4レイアウト定義とテキスト折り返し

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白設定（mm）
pub const MARGIN_MM: f32 = 15.0;
pub const FOOTER_MM: f32 = 10.0;

pub const USABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 180mm

/// 表の列幅（mm）: CUスコア表
pub const SCORE_COLUMNS_MM: [f32; 4] = [25.0, 105.0, 25.0, 25.0];
/// 表の列幅（mm）: キーワード表
pub const KEYWORD_COLUMNS_MM: [f32; 3] = [55.0, 20.0, 105.0];

// ============================================
// フォント
// ============================================

pub const TITLE_SIZE_PT: f32 = 16.0;
pub const HEADING_SIZE_PT: f32 = 12.0;
pub const BODY_SIZE_PT: f32 = 9.0;
pub const SMALL_SIZE_PT: f32 = 7.5;

/// Helvetica average glyph width relative to the font size
pub const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// 行間（フォントサイズ比）
pub const LINE_SPACING: f32 = 1.35;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// Line height in mm for a font size in pt
#[inline]
pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * LINE_SPACING)
}

/// Characters that fit in `width_mm` at `size_pt`
pub fn chars_per_line(width_mm: f32, size_pt: f32) -> usize {
    let char_width_pt = size_pt * AVG_CHAR_WIDTH_EM;
    ((mm_to_pt(width_mm) / char_width_pt).floor() as usize).max(1)
}

// ============================================
// 折り返し
// ============================================

/// Wrap styled runs into lines of at most `max_chars` characters.
///
/// Breaks at spaces; a word longer than a line is split hard. Each output
/// line keeps the run kinds of the text it carries, and adjacent pieces of
/// the same kind are merged.
pub fn wrap_runs<'a, K, I>(runs: I, max_chars: usize) -> Vec<Vec<(String, K)>>
where
    K: Copy + PartialEq,
    I: IntoIterator<Item = (&'a str, K)>,
{
    let max_chars = max_chars.max(1);
    let mut lines: Vec<Vec<(String, K)>> = Vec::new();
    let mut line: Vec<(String, K)> = Vec::new();
    let mut width = 0usize;

    fn push<K: Copy + PartialEq>(line: &mut Vec<(String, K)>, text: &str, kind: K) {
        match line.last_mut() {
            Some((last, k)) if *k == kind => last.push_str(text),
            _ => line.push((text.to_string(), kind)),
        }
    }

    for (text, kind) in runs {
        // split into words and single spaces, keeping both
        let mut rest = text;
        while !rest.is_empty() {
            let token_len = if rest.starts_with(char::is_whitespace) {
                rest.chars().next().map(char::len_utf8).unwrap_or(1)
            } else {
                rest.find(char::is_whitespace).unwrap_or(rest.len())
            };
            let (token, tail) = rest.split_at(token_len);
            rest = tail;

            if token.starts_with(char::is_whitespace) {
                if width > 0 && width < max_chars {
                    push(&mut line, " ", kind);
                    width += 1;
                }
                continue;
            }

            let mut word = token;
            loop {
                let word_chars = word.chars().count();
                if width + word_chars <= max_chars {
                    push(&mut line, word, kind);
                    width += word_chars;
                    break;
                }
                if width > 0 {
                    lines.push(trim_line(std::mem::take(&mut line)));
                    width = 0;
                    continue;
                }
                // 1行に収まらない単語は強制分割
                let cut = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                push(&mut line, &word[..cut], kind);
                lines.push(std::mem::take(&mut line));
                word = &word[cut..];
                if word.is_empty() {
                    break;
                }
            }
        }
    }

    if !line.is_empty() {
        lines.push(trim_line(line));
    }
    lines
}

fn trim_line<K>(mut line: Vec<(String, K)>) -> Vec<(String, K)> {
    if let Some((last, _)) = line.last_mut() {
        let trimmed = last.trim_end().len();
        last.truncate(trimmed);
    }
    line.retain(|(t, _)| !t.is_empty());
    line
}

/// Wrap plain text
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    wrap_runs(std::iter::once((text, ())), max_chars)
        .into_iter()
        .map(|line| line.into_iter().map(|(t, _)| t).collect())
        .collect()
}

/// Shorten to `max_chars`, ending with "..." when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
