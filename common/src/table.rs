//! 参照テーブル（メーリング）モデル
//!
//! ヘッダー行と行データを保持する。空セルは `None`。

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io::Read;

/// セル値（空セルは `None`）
pub type Cell = Option<String>;

/// 参照テーブル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ReferenceTable {
    /// ヘッダーと生の行データから構築
    ///
    /// - 空ヘッダーは `Unnamed: <列番号>`、重複ヘッダーは `<名前>.<n>` に置換
    /// - 短い行は空セルで補完、ヘッダーより長い行はエラー
    /// - 空文字列のセルは `None`
    pub fn from_raw(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(Error::EmptyReference);
        }

        let headers = dedup_headers(headers);
        let width = headers.len();

        let mut table_rows = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(Error::MalformedData(format!(
                    "{}行目: {}列を期待しましたが{}列あります",
                    i + 2,
                    width,
                    row.len()
                )));
            }
            // 完全な空行は読み飛ばす
            if row.iter().all(|c| c.is_empty()) {
                continue;
            }
            let mut cells: Vec<Cell> = row
                .into_iter()
                .map(|c| if c.is_empty() { None } else { Some(c) })
                .collect();
            cells.resize(width, None);
            table_rows.push(cells);
        }

        Ok(Self {
            headers,
            rows: table_rows,
        })
    }

    /// CSVから読み込み（1行目がヘッダー）
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();

        let headers: Vec<String> = match records.next() {
            Some(record) => record?
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    if i == 0 {
                        h.trim_start_matches('\u{feff}').to_string()
                    } else {
                        h.to_string()
                    }
                })
                .collect(),
            None => return Err(Error::EmptyReference),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Self::from_raw(headers, rows)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル値を取得
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// 指定行だけを抜き出した表（ヘッダーは同じ）
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: rows
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// 列 `column` のセルに `needle`（小文字化済み）を含む行番号
    pub fn rows_containing<'a>(
        &'a self,
        column: usize,
        needle: &'a str,
    ) -> impl Iterator<Item = usize> + 'a {
        (0..self.len()).filter(move |&row| {
            self.cell(row, column)
                .is_some_and(|cell| cell.to_lowercase().contains(needle))
        })
    }

    /// 列名から列番号を取得
    ///
    /// 完全一致を優先し、なければ大文字小文字・前後空白を無視して探す。
    pub fn column_index(&self, name: &str) -> Result<usize> {
        if let Some(idx) = self.headers.iter().position(|h| h == name) {
            return Ok(idx);
        }

        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
            .ok_or_else(|| Error::ColumnNotFound {
                name: name.to_string(),
                available: self.headers.join(", "),
            })
    }
}

/// 空・重複ヘッダーを一意な名前に置換
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for (i, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            header
        };

        let mut name = base.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{}.{}", base, n);
        }
        seen.insert(name.clone());
        result.push(name);
    }

    result
}
