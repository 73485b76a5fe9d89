//! スプレッドシート共有リンクの解析
//!
//! 共有リンクの `/d/<id>/` からドキュメントIDを取り出し、
//! CSVエクスポート用URLに変換する。

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;

/// エクスポートURLの既定ホスト
pub const DEFAULT_EXPORT_HOST: &str = "docs.google.com";

/// スプレッドシートのドキュメントID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetId(String);

impl SheetId {
    /// 共有リンクからドキュメントIDを抽出
    pub fn from_link(link: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref DOC_ID_RE: Regex = Regex::new(r"/d/([a-zA-Z0-9_-]+)").unwrap();
        }

        DOC_ID_RE
            .captures(link)
            .and_then(|caps| caps.get(1))
            .map(|m| SheetId(m.as_str().to_string()))
            .ok_or_else(|| Error::InvalidSheetLink(link.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSVエクスポートURL
    pub fn export_url(&self, host: &str) -> String {
        format!(
            "https://{}/spreadsheets/d/{}/export?format=csv",
            host, self.0
        )
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
