use clap::{Args, Parser, Subcommand};
use cu_analyzer_common::{CountMode, EngineKind, Field, Taxonomy};
use std::path::PathBuf;

use crate::config::ScoringOverrides;

#[derive(Parser)]
#[command(name = "cu-analyzer")]
#[command(about = "NOSS CU Green Technology / IR4.0 keyword scoring tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Scoring flags shared by `analyze` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Counting mode (different/repeated); selects the global policy
    #[arg(long)]
    pub count_mode: Option<CountMode>,

    /// Require a verb before the keyword in every field
    #[arg(long)]
    pub verbs: bool,

    /// Fields that require a verb (comma separated); selects the per-field policy
    #[arg(long, value_delimiter = ',')]
    pub verb_fields: Option<Vec<Field>>,

    /// CU pass threshold (0-100)
    #[arg(long)]
    pub pass_threshold: Option<u32>,

    /// Matching engine (regex/aho-corasick)
    #[arg(long)]
    pub engine: Option<EngineKind>,
}

impl ScoringArgs {
    pub fn overrides(&self) -> ScoringOverrides {
        ScoringOverrides {
            count_mode: self.count_mode,
            require_verbs: self.verbs.then_some(true),
            verb_fields: self.verb_fields.clone(),
            pass_threshold: self.pass_threshold,
            engine: self.engine,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// NOSS HTML (file or folder) or manual JSON document を解析してレポートJSONを出力
    Analyze {
        /// 入力ファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力と同じ場所/report.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// レポートJSONからPDF/HTML/Excelを生成
    Export {
        /// 入力レポートJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (pdf/html/excel/all)
        #[arg(short, long, default_value = "all")]
        format: ExportFormat,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 解析からエクスポートまで一括実行
    Run {
        /// 入力ファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (pdf/html/excel/all)
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// カスタムキーワード管理
    Keywords {
        /// 対象タクソノミー (gt/ir)
        #[arg(required = true)]
        taxonomy: Taxonomy,

        #[command(subcommand)]
        action: KeywordAction,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// フィールドの重みを設定 (例: title=10)
        #[arg(long, value_parser = parse_field_assignment)]
        set_weight: Vec<(Field, i64)>,

        /// フィールドの閾値を設定 (例: pc=5)
        #[arg(long, value_parser = parse_field_assignment)]
        set_threshold: Vec<(Field, i64)>,

        /// カウントモード (different/repeated)、グローバルポリシーに切替
        #[arg(long)]
        count_mode: Option<CountMode>,

        /// 全フィールドで動詞を必須にする (true/false)
        #[arg(long)]
        require_verbs: Option<bool>,

        /// 動詞必須フィールド（カンマ区切り）、フィールド別ポリシーに切替
        #[arg(long, value_delimiter = ',')]
        verb_fields: Option<Vec<Field>>,

        /// CU合格閾値
        #[arg(long)]
        pass_threshold: Option<u32>,

        /// 照合エンジン (regex/aho-corasick)
        #[arg(long)]
        engine: Option<EngineKind>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum KeywordAction {
    /// キーワード一覧 (top10 / all / 頭文字)
    List {
        #[arg(default_value = "top10")]
        filter: String,
    },

    /// キーワードを追加
    Add {
        /// ベースキーワード
        label: String,

        /// バリアント（, ; 改行区切り）
        #[arg(short = 'V', long, default_value = "")]
        variants: String,
    },

    /// キーワードを編集
    Edit {
        /// 現在のラベル
        label: String,

        /// 新しいラベル
        #[arg(long)]
        rename: Option<String>,

        /// バリアントを置き換え（, ; 改行区切り）
        #[arg(short = 'V', long)]
        variants: Option<String>,
    },

    /// キーワードを削除
    Delete {
        label: String,

        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 指定バリアントのみ削除
    DeleteVariants {
        label: String,

        /// 削除するバリアント（, ; 改行区切り）
        #[arg(required = true)]
        variants: String,
    },

    /// このタクソノミーのカスタムキーワードを全削除
    Clear {
        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parse `FIELD=N`
pub fn parse_field_assignment(s: &str) -> Result<(Field, i64), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected FIELD=N, got: {}", s))?;
    let field: Field = field.parse()?;
    let value: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", value))?;
    Ok((field, value))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Html,
    Excel,
    #[default]
    All,
}

impl ExportFormat {
    pub fn includes(&self, other: ExportFormat) -> bool {
        *self == ExportFormat::All || *self == other
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "html" | "htm" => Ok(ExportFormat::Html),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" | "both" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use pdf, html, excel, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_field_assignment() {
        assert_eq!(parse_field_assignment("title=10"), Ok((Field::Title, 10)));
        assert_eq!(parse_field_assignment("pc= 5"), Ok((Field::PerformanceCriteria, 5)));
        assert!(parse_field_assignment("title").is_err());
        assert!(parse_field_assignment("title=x").is_err());
        assert!(parse_field_assignment("summary=1").is_err());
    }

    #[test]
    fn test_export_format() {
        assert_eq!("HTML".parse::<ExportFormat>(), Ok(ExportFormat::Html));
        assert!(ExportFormat::All.includes(ExportFormat::Pdf));
        assert!(!ExportFormat::Excel.includes(ExportFormat::Pdf));
    }

    #[test]
    fn test_scoring_args_parse() {
        let cli = Cli::try_parse_from([
            "cu-analyzer",
            "analyze",
            "doc.html",
            "--verb-fields",
            "wa,pc",
            "--engine",
            "aho-corasick",
        ])
        .unwrap();
        let Commands::Analyze { scoring, .. } = cli.command else {
            panic!("expected analyze");
        };
        let overrides = scoring.overrides();
        assert_eq!(
            overrides.verb_fields,
            Some(vec![Field::WorkActivity, Field::PerformanceCriteria])
        );
        assert_eq!(overrides.engine, Some(EngineKind::AhoCorasick));
        assert_eq!(overrides.require_verbs, None);
    }
}
