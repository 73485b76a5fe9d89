//! 媒体名検索（CLI版）

use crate::config::Config;
use crate::error::Result;
use crate::export;
use mailing_scope_common::{search_rows, ReferenceTable};
use std::path::{Path, PathBuf};

/// 検索結果
pub struct SearchOutcome {
    pub hits: ReferenceTable,
    pub saved_to: Option<PathBuf>,
}

/// 検索して結果を表示し、指定があればxlsxに保存
pub fn run_search(
    table: &ReferenceTable,
    column: &str,
    term: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<SearchOutcome> {
    let rows = search_rows(table, column, term)?;
    let hits = table.select_rows(&rows);

    if hits.is_empty() {
        println!(
            "✗ '{}' に一致する媒体は見つかりませんでした。名前と列 '{}' を確認してください",
            term, column
        );
        return Ok(SearchOutcome {
            hits,
            saved_to: None,
        });
    }

    println!("✔ '{}' の検索結果: {}件\n", term, hits.len());
    print_table(&hits);

    let saved_to = match output {
        Some(path) => {
            let path = export::output_path_for(Some(path), "busca.xlsx");
            export::write_xlsx(&hits, &path, &config.sheet_name)?;
            println!("\n✔ 検索結果を保存: {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(SearchOutcome { hits, saved_to })
}

/// 表をレコード形式で表示
pub fn print_table(table: &ReferenceTable) {
    let width = table
        .headers()
        .iter()
        .map(|h| h.chars().count())
        .max()
        .unwrap_or(0);

    for (i, row) in table.rows().iter().enumerate() {
        println!("--- {} ---", i + 1);
        for (header, cell) in table.headers().iter().zip(row) {
            println!(
                "  {:<width$} : {}",
                header,
                cell.as_deref().unwrap_or(""),
                width = width
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_search_without_output() {
        let table =
            ReferenceTable::from_csv_str("Veículo,Cidade\nFolha de S.Paulo,SP\nO Globo,RJ\n").unwrap();
        let outcome = run_search(&table, "Veículo", "globo", None, &Config::default()).unwrap();
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(outcome.hits.cell(0, 1), Some("RJ"));
        assert!(outcome.saved_to.is_none());
    }

    #[test]
    fn test_run_search_no_hits() {
        let table = ReferenceTable::from_csv_str("Veículo\nFolha\n").unwrap();
        let outcome = run_search(&table, "Veículo", "Estadão", None, &Config::default()).unwrap();
        assert!(outcome.hits.is_empty());
    }
}
