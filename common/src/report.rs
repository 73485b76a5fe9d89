//! レポート組み立て
//!
//! 列順: 候補の元テキスト, ステータス, 参照テーブルの全列（元の順序）。
//! 候補1件につき1行。一致しなかった候補の参照列は空。

use crate::candidates::Candidate;
use crate::matcher::MatchResult;
use crate::table::{Cell, ReferenceTable};
use serde::{Deserialize, Serialize};

/// 候補列の既定ヘッダー
pub const DEFAULT_CANDIDATE_HEADER: &str = "Link_Original";
/// ステータス列ヘッダー
pub const STATUS_HEADER: &str = "Status";

/// スコープ判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeStatus {
    InScope,
    OutOfScope,
}

/// ステータスの表示ラベル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabels {
    pub in_scope: String,
    pub out_of_scope: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            in_scope: "IN SCOPE".into(),
            out_of_scope: "OUT OF SCOPE".into(),
        }
    }
}

impl StatusLabels {
    pub fn label(&self, status: ScopeStatus) -> &str {
        match status {
            ScopeStatus::InScope => &self.in_scope,
            ScopeStatus::OutOfScope => &self.out_of_scope,
        }
    }
}

/// 判定の基準となる参照側フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAnchor {
    /// 一致行の1列目が空でなければ範囲内
    #[default]
    FirstColumn,
    /// 一致行があれば範囲内
    JoinKey,
}

impl std::str::FromStr for StatusAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_column" | "first" => Ok(StatusAnchor::FirstColumn),
            "join_key" | "key" | "match" => Ok(StatusAnchor::JoinKey),
            _ => Err(format!("Unknown anchor: {}. Use first-column or join-key", s)),
        }
    }
}

impl std::fmt::Display for StatusAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusAnchor::FirstColumn => write!(f, "first-column"),
            StatusAnchor::JoinKey => write!(f, "join-key"),
        }
    }
}

/// レポート生成オプション
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub candidate_header: String,
    pub labels: StatusLabels,
    pub anchor: StatusAnchor,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            candidate_header: DEFAULT_CANDIDATE_HEADER.into(),
            labels: StatusLabels::default(),
            anchor: StatusAnchor::default(),
        }
    }
}

/// レポート1行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub original_text: String,
    pub status: ScopeStatus,
    /// 参照列の値（一致なしは全て空）
    pub reference: Vec<Cell>,
}

/// レポートの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub in_scope: usize,
    pub out_of_scope: usize,
    /// ドメインを抽出できなかった候補数（照合方式に関係なく数える）
    pub without_domain: usize,
}

/// スコープ判定レポート
#[derive(Debug, Clone)]
pub struct Report {
    headers: Vec<String>,
    rows: Vec<ReportRow>,
    labels: StatusLabels,
    without_domain: usize,
}

impl Report {
    /// 照合結果からレポートを組み立て
    ///
    /// `results` は `candidates` と同じ順序・件数であること。
    pub fn assemble(
        table: &ReferenceTable,
        candidates: &[Candidate],
        results: &[MatchResult],
        options: &ReportOptions,
    ) -> Self {
        debug_assert_eq!(candidates.len(), results.len());

        let width = table.headers().len();
        let rows = candidates
            .iter()
            .zip(results)
            .map(|(candidate, result)| {
                let reference: Vec<Cell> = match result.matched_row {
                    Some(row) => table
                        .rows()
                        .get(row)
                        .cloned()
                        .unwrap_or_else(|| vec![None; width]),
                    None => vec![None; width],
                };
                let in_scope = match options.anchor {
                    StatusAnchor::FirstColumn => reference.first().is_some_and(|c| c.is_some()),
                    StatusAnchor::JoinKey => result.is_match(),
                };
                ReportRow {
                    original_text: candidate.original_text.clone(),
                    status: if in_scope {
                        ScopeStatus::InScope
                    } else {
                        ScopeStatus::OutOfScope
                    },
                    reference,
                }
            })
            .collect();

        let mut headers = vec![options.candidate_header.clone(), STATUS_HEADER.to_string()];
        headers.extend(table.headers().iter().cloned());

        Self {
            headers,
            rows,
            labels: options.labels.clone(),
            without_domain: candidates.iter().filter(|c| c.clean_domain.is_none()).count(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn status_label(&self, status: ScopeStatus) -> &str {
        self.labels.label(status)
    }

    /// 出力用の行データ（ヘッダーと同じ列順）
    pub fn cells(&self) -> impl Iterator<Item = Vec<Option<&str>>> + '_ {
        self.rows.iter().map(|row| {
            let mut cells = Vec::with_capacity(self.headers.len());
            cells.push(Some(row.original_text.as_str()));
            cells.push(Some(self.labels.label(row.status)));
            cells.extend(row.reference.iter().map(|c| c.as_deref()));
            cells
        })
    }

    pub fn summary(&self) -> ReportSummary {
        let in_scope = self
            .rows
            .iter()
            .filter(|r| r.status == ScopeStatus::InScope)
            .count();
        ReportSummary {
            total: self.rows.len(),
            in_scope,
            out_of_scope: self.rows.len() - in_scope,
            without_domain: self.without_domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::parse_candidates;
    use crate::matcher::{match_candidates, ColumnRoles, MatchPlan, MatchStrategy};

    fn build(table_csv: &str, input: &str, options: &ReportOptions) -> Report {
        let table = ReferenceTable::from_csv_str(table_csv).unwrap();
        let candidates = parse_candidates(input);
        let roles = ColumnRoles {
            url_column: Some("site".into()),
            ..Default::default()
        };
        let results = match_candidates(&table, &roles, &candidates, MatchPlan::default()).unwrap();
        Report::assemble(&table, &candidates, &results, options)
    }

    #[test]
    fn test_globo_uol_scenario() {
        let report = build(
            "site,id\nhttp://www.globo.com,1\n",
            "globo.com\nhttps://uol.com.br",
            &ReportOptions::default(),
        );

        assert_eq!(report.headers(), &["Link_Original", "Status", "site", "id"]);
        let cells: Vec<_> = report.cells().collect();
        assert_eq!(
            cells[0],
            vec![Some("globo.com"), Some("IN SCOPE"), Some("http://www.globo.com"), Some("1")]
        );
        assert_eq!(cells[1], vec![Some("https://uol.com.br"), Some("OUT OF SCOPE"), None, None]);
    }

    #[test]
    fn test_row_count_matches_candidates_in_order() {
        let input = "c.com\na.com\nb.com\nnot a url\nc.com";
        let report = build("id,site\n1,a.com\n", input, &ReportOptions::default());
        let texts: Vec<&str> = report.rows().iter().map(|r| r.original_text.as_str()).collect();
        assert_eq!(texts, vec!["c.com", "a.com", "b.com", "not a url", "c.com"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let report = build("id,site\n1,a.com\n", "a.com\na.com", &ReportOptions::default());
        assert_eq!(report.len(), 2);
        assert_eq!(report.rows()[0], report.rows()[1]);
    }

    #[test]
    fn test_anchor_first_column_empty() {
        let csv = "nome,site\n,a.com\n";
        let by_first = build(csv, "a.com", &ReportOptions::default());
        assert_eq!(by_first.rows()[0].status, ScopeStatus::OutOfScope);

        let options = ReportOptions {
            anchor: StatusAnchor::JoinKey,
            ..Default::default()
        };
        let by_key = build(csv, "a.com", &options);
        assert_eq!(by_key.rows()[0].status, ScopeStatus::InScope);
    }

    #[test]
    fn test_custom_labels_and_header() {
        let options = ReportOptions {
            candidate_header: "Veiculo_Original".into(),
            labels: StatusLabels {
                in_scope: "DENTRO DO ESCOPO".into(),
                out_of_scope: "FORA DO ESCOPO".into(),
            },
            ..Default::default()
        };
        let report = build("id,site\n1,a.com\n", "a.com\nb.com", &options);
        assert_eq!(report.headers()[0], "Veiculo_Original");
        let cells: Vec<_> = report.cells().collect();
        assert_eq!(cells[0][1], Some("DENTRO DO ESCOPO"));
        assert_eq!(cells[1][1], Some("FORA DO ESCOPO"));
    }

    #[test]
    fn test_summary() {
        let report = build("id,site\n1,a.com\n", "a.com\nb.com\nsem dominio", &ReportOptions::default());
        assert_eq!(
            report.summary(),
            ReportSummary {
                total: 3,
                in_scope: 1,
                out_of_scope: 2,
                without_domain: 1,
            }
        );
    }

    #[test]
    fn test_without_domain_counted_for_name_plan() {
        let table = ReferenceTable::from_csv_str("nome\nSem Site\n").unwrap();
        let candidates = parse_candidates("Sem Site\nglobo.com");
        let roles = ColumnRoles {
            name_column: Some("nome".into()),
            ..Default::default()
        };
        let plan = MatchPlan::single(MatchStrategy::Name);
        let results = match_candidates(&table, &roles, &candidates, plan).unwrap();
        let report = Report::assemble(&table, &candidates, &results, &ReportOptions::default());

        let summary = report.summary();
        assert_eq!(summary.in_scope, 1);
        assert_eq!(summary.without_domain, 1);
    }

    #[test]
    fn test_row_outside_table_is_empty() {
        let table = ReferenceTable::from_csv_str("id,site\n1,a.com\n").unwrap();
        let candidates = parse_candidates("a.com");
        let results = [MatchResult {
            matched_row: Some(5),
            strategy: Some(MatchStrategy::Domain),
        }];
        let report = Report::assemble(&table, &candidates, &results, &ReportOptions::default());
        assert_eq!(report.rows()[0].reference, vec![None, None]);
        assert_eq!(report.rows()[0].status, ScopeStatus::OutOfScope);
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!("first-column".parse::<StatusAnchor>().unwrap(), StatusAnchor::FirstColumn);
        assert_eq!("join_key".parse::<StatusAnchor>().unwrap(), StatusAnchor::JoinKey);
        assert!("other".parse::<StatusAnchor>().is_err());
    }
}
