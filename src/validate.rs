//! スコープ判定の実行
//!
//! 列の確定 → 照合 → レポート組み立て → xlsx出力 の順に進める。

use crate::columns;
use crate::config::Config;
use crate::error::Result;
use crate::export;
use mailing_scope_common::{
    match_candidates, Candidate, ColumnRoles, MatchPlan, MatchStrategy, ReferenceTable, Report,
    ScopeStatus, StatusAnchor,
};
use std::path::{Path, PathBuf};

/// 判定オプション
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub roles: ColumnRoles,
    pub plan: MatchPlan,
    pub anchor: Option<StatusAnchor>,
    /// 未指定の列を対話的に選ばせるか
    pub interactive: bool,
}

/// 照合してレポートを組み立てる
pub fn build_report(
    table: &ReferenceTable,
    candidates: &[Candidate],
    options: &ValidateOptions,
    config: &Config,
) -> Result<Report> {
    let roles = columns::resolve_roles(table, &options.roles, &options.plan, options.interactive)?;
    log::debug!("列の役割: {:?}", roles);

    let results = match_candidates(table, &roles, candidates, options.plan.clone())?;
    Ok(Report::assemble(
        table,
        candidates,
        &results,
        &config.report_options(options.anchor),
    ))
}

/// レポートをxlsxに保存し、保存先を返す
pub fn save_report(report: &Report, output: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let output_path = export::output_path_for(output, &config.output_file_name);
    export::write_xlsx(report, &output_path, &config.sheet_name)?;
    Ok(output_path)
}

/// 集計と範囲外の候補を表示
pub fn print_summary(report: &Report, plan: &MatchPlan, verbose: bool) {
    let summary = report.summary();
    println!(
        "  {}: {}件 / {}: {}件 (合計 {}件)",
        report.status_label(ScopeStatus::InScope),
        summary.in_scope,
        report.status_label(ScopeStatus::OutOfScope),
        summary.out_of_scope,
        summary.total
    );
    if plan.contains(MatchStrategy::Domain) && summary.without_domain > 0 {
        println!("  ⚠ ドメインを抽出できなかった候補: {}件", summary.without_domain);
    }

    if verbose {
        for row in report.rows() {
            println!("  [{}] {}", report.status_label(row.status), row.original_text);
        }
    }
}
