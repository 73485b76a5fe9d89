//! 参照テーブルの読み込みとセッションキャッシュ
//!
//! - 共有リンク（ネットワーク取得）とローカルファイル（CSV/Excel）に対応
//! - キャッシュはセッションごとに持ち、リンクが変わったら破棄する

use crate::config::Config;
use crate::error::{Result, ScopeError};
use crate::fetch;
use calamine::{open_workbook_auto, Data, Reader};
use mailing_scope_common::{ReferenceTable, SheetId};
use std::future::Future;
use std::path::{Path, PathBuf};

/// 参照テーブルの取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    /// スプレッドシート共有リンク
    Link(SheetId),
    /// ローカルファイル（.csv / .xlsx など）
    File(PathBuf),
}

impl ReferenceSource {
    /// CLI引数から取得元を決定（リンクはここでID抽出まで行う）
    pub fn from_args(link: Option<&str>, file: Option<&Path>) -> Result<Self> {
        match (link, file) {
            (Some(link), _) => Ok(Self::Link(SheetId::from_link(link)?)),
            (None, Some(path)) => Ok(Self::File(path.to_path_buf())),
            (None, None) => Err(ScopeError::MissingInput(
                "--link または --reference で参照シートを指定してください".into(),
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Link(id) => format!("スプレッドシート {}", id),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// 取得元から参照テーブルを読み込み
pub async fn load_reference(source: &ReferenceSource, config: &Config) -> Result<ReferenceTable> {
    match source {
        ReferenceSource::Link(id) => fetch::fetch_reference(id, config).await,
        ReferenceSource::File(path) => load_reference_file(path),
    }
}

/// ローカルファイルから参照テーブルを読み込み
pub fn load_reference_file(path: &Path) -> Result<ReferenceTable> {
    if !path.exists() {
        return Err(ScopeError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| ScopeError::UnsupportedFormat(path.display().to_string()))?;

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)?;
            Ok(ReferenceTable::from_csv_reader(file)?)
        }
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path),
        other => Err(ScopeError::UnsupportedFormat(other.to_string())),
    }
}

fn load_workbook(path: &Path) -> Result<ReferenceTable> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ScopeError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScopeError::Workbook("ワークシートが見つかりませんでした".into()))?
        .map_err(|e| ScopeError::Workbook(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or(ScopeError::Common(mailing_scope_common::Error::EmptyReference))?;

    Ok(ReferenceTable::from_raw(headers, rows.collect())?)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

/// セッション単位の参照テーブルキャッシュ
///
/// 直近のドキュメントIDの表だけを保持する。別のIDが来たら破棄して取り直す。
#[derive(Debug, Default)]
pub struct ReferenceCache {
    current: Option<(SheetId, ReferenceTable)>,
    hits: usize,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュ済みならそれを返し、なければ `load` で取得して保持
    pub async fn get_or_load<F, Fut>(&mut self, id: &SheetId, load: F) -> Result<&ReferenceTable>
    where
        F: FnOnce(SheetId) -> Fut,
        Fut: Future<Output = Result<ReferenceTable>>,
    {
        let entry = match self.current.take() {
            Some(entry) if entry.0 == *id => {
                self.hits += 1;
                log::debug!("キャッシュヒット: {}", id);
                entry
            }
            previous => {
                if let Some((old, _)) = previous {
                    log::debug!("キャッシュ破棄: {} → {}", old, id);
                }
                let table = load(id.clone()).await?;
                (id.clone(), table)
            }
        };

        Ok(&self.current.insert(entry).1)
    }

    /// 共有リンクの表を取得（キャッシュ経由）
    pub async fn fetch(&mut self, id: &SheetId, config: &Config) -> Result<&ReferenceTable> {
        self.get_or_load(id, |id| async move { fetch::fetch_reference(&id, config).await })
            .await
    }

    pub fn current_id(&self) -> Option<&SheetId> {
        self.current.as_ref().map(|(id, _)| id)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_args() {
        let source = ReferenceSource::from_args(
            Some("https://docs.google.com/spreadsheets/d/abc/edit"),
            None,
        )
        .unwrap();
        assert!(matches!(source, ReferenceSource::Link(ref id) if id.as_str() == "abc"));

        assert!(ReferenceSource::from_args(Some("https://example.com/x"), None).is_err());
        assert!(matches!(
            ReferenceSource::from_args(None, None).unwrap_err(),
            ScopeError::MissingInput(_)
        ));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(" a ".into())), " a ");
    }
}
