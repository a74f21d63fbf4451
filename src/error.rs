use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuAnalyzerError {
    #[error(transparent)]
    Common(#[from] cu_analyzer_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("HTMLドキュメントが見つかりません: {0}")]
    NoDocumentsFound(String),

    #[error("HTML解析エラー: {0}")]
    HtmlParse(String),

    #[error("キーワードストアエラー: {0}")]
    KeywordStore(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("HTML出力エラー: {0}")]
    HtmlExport(String),
}

pub type Result<T> = std::result::Result<T, CuAnalyzerError>;
