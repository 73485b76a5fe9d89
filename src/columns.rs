//! 列の役割の確定
//!
//! コマンドラインで指定されなかった列は、読み込んだヘッダー一覧から
//! 対話的に選んでもらう。位置による推測は選択肢の初期値にだけ使う。

use crate::error::{Result, ScopeError};
use dialoguer::Select;
use mailing_scope_common::{ColumnRoles, MatchPlan, MatchStrategy, ReferenceTable};
use std::io::IsTerminal;

/// URL列の初期候補（D列）
const URL_COLUMN_SUGGESTION: usize = 3;

/// 選択肢の初期位置
pub fn suggested_index(strategy: MatchStrategy, header_count: usize) -> usize {
    match strategy {
        MatchStrategy::Domain if header_count > URL_COLUMN_SUGGESTION => URL_COLUMN_SUGGESTION,
        _ => 0,
    }
}

/// 照合方式に必要な列をすべて確定させる
///
/// 指定済みの列は名前の存在だけ確認する。未指定の列は端末なら選択させ、
/// 端末でなければ入力不足としてエラーにする。
pub fn resolve_roles(
    table: &ReferenceTable,
    given: &ColumnRoles,
    plan: &MatchPlan,
    interactive: bool,
) -> Result<ColumnRoles> {
    let mut roles = given.clone();
    let can_prompt = interactive && std::io::stdin().is_terminal();

    for &strategy in plan.strategies() {
        let slot = match strategy {
            MatchStrategy::Domain => &mut roles.url_column,
            MatchStrategy::Partial => &mut roles.search_column,
            MatchStrategy::Name => &mut roles.name_column,
        };

        if let Some(name) = slot.as_deref() {
            table.column_index(name)?;
        } else if can_prompt {
            *slot = Some(select_column(table, strategy)?);
        } else {
            return Err(ScopeError::MissingInput(format!(
                "{}を指定してください（{} 照合に必要）",
                strategy.required_role(),
                strategy
            )));
        }
    }

    Ok(roles)
}

/// ヘッダー一覧から列を選択
pub fn select_column(table: &ReferenceTable, strategy: MatchStrategy) -> Result<String> {
    let headers = table.headers();
    let prompt = match strategy {
        MatchStrategy::Domain => "URLが入っている列はどれですか？",
        MatchStrategy::Name => "媒体名が入っている列はどれですか？",
        MatchStrategy::Partial => "検索対象の列はどれですか？",
    };

    let index = Select::new()
        .with_prompt(prompt)
        .items(headers)
        .default(suggested_index(strategy, headers.len()))
        .interact()?;

    println!("→ {} 列: '{}'", strategy.required_role(), headers[index]);
    Ok(headers[index].clone())
}

/// ヘッダー一覧を表示（列記号付き）
pub fn print_headers(table: &ReferenceTable) {
    for (i, header) in table.headers().iter().enumerate() {
        println!("  {:>3} ({}) {}", i + 1, column_letter(i), header);
    }
}

/// 0始まりの列番号をExcelの列記号に変換
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
