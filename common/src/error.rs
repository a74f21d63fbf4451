//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The surface alternation could not be compiled (usually a size limit).
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<aho_corasick::BuildError> for Error {
    fn from(err: aho_corasick::BuildError) -> Self {
        Error::Pattern(err.to_string())
    }
}
