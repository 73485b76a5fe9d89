//! 媒体名検索
//!
//! 指定列に語を含む行をすべて返す（照合と違い先頭1件に絞らない）。

use crate::error::{Error, Result};
use crate::table::ReferenceTable;

/// 列 `column` に `term` を含む行番号（表の順）
pub fn search_rows(table: &ReferenceTable, column: &str, term: &str) -> Result<Vec<usize>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::MissingInput("search term is empty".into()));
    }

    let col = table.column_index(column)?;
    let hits: Vec<usize> = table.rows_containing(col, &needle).collect();

    log::debug!("検索 '{}' in '{}': {}件", term, column, hits.len());
    Ok(hits)
}
