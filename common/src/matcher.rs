//! 候補と参照テーブルの照合
//!
//! ## 照合方式
//! 1. ドメイン完全一致（正規化ドメイン同士）
//! 2. 部分一致（検索列のセルに候補文字列が含まれる、大文字小文字無視）
//! 3. 名前完全一致（正規化名同士）
//!
//! 複数方式を指定した場合は指定順に試し、最初に一致した方式を採用する。
//! 参照側に同じキーの行が複数あれば、表の先頭に近い行を採用する。

use crate::candidates::Candidate;
use crate::error::{Error, Result};
use crate::normalize::{clean_domain, clean_name};
use crate::table::ReferenceTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 照合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Domain,
    Partial,
    Name,
}

impl MatchStrategy {
    /// この方式が必要とする列の役割名
    pub fn required_role(&self) -> &'static str {
        match self {
            MatchStrategy::Domain => "URL column",
            MatchStrategy::Partial => "search column",
            MatchStrategy::Name => "name column",
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "domain" | "dominio" | "url" => Ok(MatchStrategy::Domain),
            "partial" | "parcial" | "contains" => Ok(MatchStrategy::Partial),
            "name" | "nome" => Ok(MatchStrategy::Name),
            other => Err(Error::InvalidPlan(format!(
                "Unknown strategy: {}. Use domain, partial, or name",
                other
            ))),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Domain => write!(f, "domain"),
            MatchStrategy::Partial => write!(f, "partial"),
            MatchStrategy::Name => write!(f, "name"),
        }
    }
}

/// 照合方式の優先順リスト（空・重複なし）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan(Vec<MatchStrategy>);

impl MatchPlan {
    pub fn new(strategies: Vec<MatchStrategy>) -> Result<Self> {
        if strategies.is_empty() {
            return Err(Error::InvalidPlan("no strategy given".into()));
        }
        for (i, s) in strategies.iter().enumerate() {
            if strategies[..i].contains(s) {
                return Err(Error::InvalidPlan(format!("duplicate strategy: {}", s)));
            }
        }
        Ok(Self(strategies))
    }

    pub fn single(strategy: MatchStrategy) -> Self {
        Self(vec![strategy])
    }

    pub fn strategies(&self) -> &[MatchStrategy] {
        &self.0
    }

    pub fn contains(&self, strategy: MatchStrategy) -> bool {
        self.0.contains(&strategy)
    }
}

impl Default for MatchPlan {
    fn default() -> Self {
        Self::single(MatchStrategy::Domain)
    }
}

impl std::str::FromStr for MatchPlan {
    type Err = Error;

    /// `domain,name` のようなカンマ区切り
    fn from_str(s: &str) -> Result<Self> {
        let strategies = s
            .split([',', '>'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<MatchStrategy>>>()?;
        Self::new(strategies)
    }
}

impl fmt::Display for MatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(" → "))
    }
}

/// 列の役割指定（列名）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    /// URLが入っている列（ドメイン照合用）
    pub url_column: Option<String>,
    /// 媒体名が入っている列（名前照合用）
    pub name_column: Option<String>,
    /// 部分一致の検索対象列
    pub search_column: Option<String>,
}

impl ColumnRoles {
    fn column_for(&self, strategy: MatchStrategy) -> Option<&str> {
        match strategy {
            MatchStrategy::Domain => self.url_column.as_deref(),
            MatchStrategy::Partial => self.search_column.as_deref(),
            MatchStrategy::Name => self.name_column.as_deref(),
        }
    }
}

/// 1候補の照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchResult {
    /// 一致した参照行（表内の行番号）
    pub matched_row: Option<usize>,
    /// 一致した方式
    pub strategy: Option<MatchStrategy>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.matched_row.is_some()
    }
}

/// 照合器（参照側のインデックスを保持）
pub struct Matcher<'a> {
    table: &'a ReferenceTable,
    plan: MatchPlan,
    domain_index: HashMap<String, usize>,
    name_index: HashMap<String, usize>,
    search_column: Option<usize>,
}

impl<'a> Matcher<'a> {
    /// 照合方式ごとに必要な列を解決し、インデックスを構築
    pub fn new(table: &'a ReferenceTable, roles: &ColumnRoles, plan: MatchPlan) -> Result<Self> {
        let mut columns = HashMap::new();
        for &strategy in plan.strategies() {
            let name = roles.column_for(strategy).ok_or_else(|| {
                Error::MissingInput(format!(
                    "{} is required for {} matching",
                    strategy.required_role(),
                    strategy
                ))
            })?;
            columns.insert(strategy, table.column_index(name)?);
        }

        let domain_index = match columns.get(&MatchStrategy::Domain) {
            Some(&col) => first_row_index(table, col, clean_domain),
            None => HashMap::new(),
        };
        let name_index = match columns.get(&MatchStrategy::Name) {
            Some(&col) => first_row_index(table, col, clean_name),
            None => HashMap::new(),
        };

        log::debug!(
            "照合インデックス構築: domain={}件 name={}件 (plan: {})",
            domain_index.len(),
            name_index.len(),
            plan
        );

        Ok(Self {
            table,
            plan,
            domain_index,
            name_index,
            search_column: columns.get(&MatchStrategy::Partial).copied(),
        })
    }

    pub fn plan(&self) -> &MatchPlan {
        &self.plan
    }

    /// 1候補を照合
    pub fn match_candidate(&self, candidate: &Candidate) -> MatchResult {
        for &strategy in self.plan.strategies() {
            if let Some(row) = self.find_row(strategy, candidate) {
                return MatchResult {
                    matched_row: Some(row),
                    strategy: Some(strategy),
                };
            }
        }
        MatchResult::default()
    }

    fn find_row(&self, strategy: MatchStrategy, candidate: &Candidate) -> Option<usize> {
        match strategy {
            MatchStrategy::Domain => candidate
                .clean_domain
                .as_ref()
                .and_then(|d| self.domain_index.get(d).copied()),
            MatchStrategy::Name => candidate
                .clean_name
                .as_ref()
                .and_then(|n| self.name_index.get(n).copied()),
            MatchStrategy::Partial => {
                let col = self.search_column?;
                find_containing_row(self.table, col, &candidate.original_text)
            }
        }
    }
}

/// 候補リスト全体を照合（候補1件につき結果1件、入力順）
pub fn match_candidates(
    table: &ReferenceTable,
    roles: &ColumnRoles,
    candidates: &[Candidate],
    plan: MatchPlan,
) -> Result<Vec<MatchResult>> {
    let matcher = Matcher::new(table, roles, plan)?;
    Ok(candidates
        .iter()
        .map(|c| matcher.match_candidate(c))
        .collect())
}

/// 正規化キー → 最初に出現した行番号
fn first_row_index(
    table: &ReferenceTable,
    column: usize,
    normalize: fn(Option<&str>) -> Option<String>,
) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for row in 0..table.len() {
        if let Some(key) = normalize(table.cell(row, column)) {
            index.entry(key).or_insert(row);
        }
    }
    index
}

/// セルに語を含む最初の行（大文字小文字無視、正規表現ではなく単純な部分文字列）
fn find_containing_row(table: &ReferenceTable, column: usize, term: &str) -> Option<usize> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let row = table.rows_containing(column, &needle).next();
    row
}
