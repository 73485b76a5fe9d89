//! Mailing Scope Common Library
//!
//! メーリング照合のコア（正規化・照合・レポート組み立て）。
//! ファイル・ネットワークI/Oは持たない。

pub mod error;
pub mod normalize;
pub mod sheet_link;
pub mod table;
pub mod candidates;
pub mod matcher;
pub mod report;
pub mod search;
pub mod export;

pub use error::{Error, Result};
pub use normalize::{clean_domain, clean_name};
pub use sheet_link::{SheetId, DEFAULT_EXPORT_HOST};
pub use table::{Cell, ReferenceTable};
pub use candidates::{parse_candidates, Candidate};
pub use matcher::{match_candidates, ColumnRoles, MatchPlan, MatchResult, MatchStrategy, Matcher};
pub use report::{Report, ReportOptions, ReportSummary, ScopeStatus, StatusAnchor, StatusLabels};
pub use search::search_rows;
