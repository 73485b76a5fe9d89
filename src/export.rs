//! Excel出力（CLI版）
//!
//! バッファを最後まで生成してからファイルに書き込むため、
//! 途中で失敗しても不完全なファイルは残らない。

use crate::error::{Result, ScopeError};
use mailing_scope_common::export::excel_core::{generate_excel_buffer, TabularData};
use std::path::{Path, PathBuf};

/// 出力先パスを決定（ディレクトリ・拡張子なしなら既定ファイル名を付ける）
pub fn output_path_for(output: Option<&Path>, default_file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(default_file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name),
    }
}

/// 表をxlsxファイルに書き出し
pub fn write_xlsx<T: TabularData>(data: &T, output_path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(data, sheet_name)
        .map_err(|e| ScopeError::ExcelGeneration(e.to_string()))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    log::debug!("xlsx出力: {}", output_path.display());
    Ok(())
}
