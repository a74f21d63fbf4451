use cu_analyzer_common::export::excel_core::ScoreRow;
use cu_analyzer_common::{
    DocumentSummary, EngineKind, Field, FieldHighlight, FieldMap, KeywordTables, Profile,
    ScoringSettings, Taxonomy, UnitScore,
};
use serde::{Deserialize, Serialize};

/// One scored CU with its texts and highlight segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUnit {
    pub code: String,

    pub title: String,

    /// Field texts exactly as matched (highlight offsets point into these)
    pub texts: FieldMap<String>,

    pub score: UnitScore,

    #[serde(default)]
    pub highlights: FieldMap<FieldHighlight>,
}

impl ReportUnit {
    pub fn text(&self, field: Field) -> &str {
        self.texts.get(field)
    }

    pub fn highlight(&self, field: Field) -> &FieldHighlight {
        self.highlights.get(field)
    }
}

impl ScoreRow for ReportUnit {
    fn code(&self) -> &str {
        &self.code
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn scores(&self, taxonomy: Taxonomy) -> &FieldMap<u32> {
        self.score.scores(taxonomy)
    }
}

/// Analysis result of one document (the JSON written by `analyze`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// 入力ファイル名
    pub source: String,

    /// 生成日時
    pub generated_at: String,

    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub units: Vec<ReportUnit>,

    pub summary: DocumentSummary,

    #[serde(default)]
    pub keywords: KeywordTables,

    pub settings: ScoringSettings,

    #[serde(default)]
    pub engine: EngineKind,

    /// 人が読めるポリシー説明
    #[serde(default)]
    pub policy: String,

    /// Hash of the surface → base table the run matched with
    #[serde(default)]
    pub vocabulary_fingerprint: String,
}

impl DocumentReport {
    pub fn title(&self) -> &str {
        let title = self.profile.get("NOSS TITLE");
        if title.is_empty() {
            &self.source
        } else {
            title
        }
    }
}
