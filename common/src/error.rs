//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid spreadsheet link (no /d/<id>/ segment): {0}")]
    InvalidSheetLink(String),

    #[error("Reference table is empty: no header row")]
    EmptyReference,

    #[error("Column not found: {name} (available: {available})")]
    ColumnNotFound { name: String, available: String },

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Invalid match strategy: {0}")]
    InvalidPlan(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_link() {
        let error = Error::InvalidSheetLink("https://example.com".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Invalid spreadsheet link"));
        assert!(display.contains("https://example.com"));
    }

    #[test]
    fn test_error_display_column_not_found() {
        let error = Error::ColumnNotFound {
            name: "Site".to_string(),
            available: "Nome, Url".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Column not found: Site (available: Nome, Url)"
        );
    }

    #[test]
    fn test_error_display_missing_input() {
        let error = Error::MissingInput("候補リストが空です".to_string());
        assert_eq!(format!("{}", error), "Missing input: 候補リストが空です");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::MalformedData("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("MalformedData"));
        assert!(debug.contains("テスト"));
    }
}
