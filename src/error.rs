use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("サポートされていないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("入力が不足しています: {0}")]
    MissingInput(String),

    #[error("スプレッドシート取得エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("スプレッドシートにアクセスできません: {0}。共有設定を「リンクを知っている全員が閲覧可」にしてください")]
    AccessDenied(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力プロンプトエラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] mailing_scope_common::Error),
}

impl From<dialoguer::Error> for ScopeError {
    fn from(e: dialoguer::Error) -> Self {
        ScopeError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
