//! Excel生成（共通ライブラリ）
//!
//! レポートを1シートのxlsxとしてバッファに書き出す。
//! 1行目がヘッダー（太字）、行番号列はなし、空セルは書き込まない。

use crate::error::{Error, Result};
use crate::report::Report;
use crate::table::ReferenceTable;
use rust_xlsxwriter::{Format, FormatBorder, Workbook};

/// xlsxのMIMEタイプ
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 既定のシート名
pub const DEFAULT_SHEET_NAME: &str = "Resultado";

/// 表形式データのトレイト（レポート・検索結果に共通）
pub trait TabularData {
    fn headers(&self) -> Vec<&str>;
    fn data_rows(&self) -> Vec<Vec<Option<&str>>>;
}

impl TabularData for Report {
    fn headers(&self) -> Vec<&str> {
        Report::headers(self).iter().map(String::as_str).collect()
    }

    fn data_rows(&self) -> Vec<Vec<Option<&str>>> {
        self.cells().collect()
    }
}

impl TabularData for ReferenceTable {
    fn headers(&self) -> Vec<&str> {
        ReferenceTable::headers(self).iter().map(String::as_str).collect()
    }

    fn data_rows(&self) -> Vec<Vec<Option<&str>>> {
        self.rows()
            .iter()
            .map(|row| row.iter().map(|c| c.as_deref()).collect())
            .collect()
    }
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `data` - 出力する表（ヘッダー + 行）
/// * `sheet_name` - シート名
pub fn generate_excel_buffer<T: TabularData>(data: &T, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

    for (col, header) in data.headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_number(col)?, *header, &header_format)
            .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
    }

    for (i, row) in data.data_rows().iter().enumerate() {
        let row_num = u32::try_from(i + 1)
            .map_err(|_| Error::Excel(format!("行数が上限を超えています: {}", i + 1)))?;
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet
                    .write_string(row_num, column_number(col)?, *value)
                    .map_err(|e| Error::Excel(format!("セル書き込みエラー: {}", e)))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Excel(format!("列数が上限を超えています: {}", col + 1)))
}
