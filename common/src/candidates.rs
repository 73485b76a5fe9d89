//! 照合候補の読み込み
//!
//! 貼り付けテキスト・テキストファイルを1行1候補として扱う。

use crate::normalize::{clean_domain, clean_name};
use serde::{Deserialize, Serialize};

/// 照合候補（URLまたは媒体名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// 入力されたままの文字列（前後空白除去済み）
    pub original_text: String,
    /// 正規化ドメイン
    pub clean_domain: Option<String>,
    /// 正規化名
    pub clean_name: Option<String>,
}

impl Candidate {
    pub fn new(text: &str) -> Self {
        let original_text = text.trim().to_string();
        Self {
            clean_domain: clean_domain(Some(&original_text)),
            clean_name: clean_name(Some(&original_text)),
            original_text,
        }
    }
}

/// 複数行テキストを候補リストに変換
///
/// 各行をトリムし空行を除外する。順序と重複は保持。
pub fn parse_candidates(text: &str) -> Vec<Candidate> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Candidate::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates_trims_and_skips_blank() {
        let candidates = parse_candidates("  globo.com \n\n\r\nhttps://uol.com.br\r\n   \n");
        let texts: Vec<&str> = candidates.iter().map(|c| c.original_text.as_str()).collect();
        assert_eq!(texts, vec!["globo.com", "https://uol.com.br"]);
    }

    #[test]
    fn test_parse_candidates_keeps_duplicates_and_order() {
        let candidates = parse_candidates("b.com\na.com\nb.com");
        let texts: Vec<&str> = candidates.iter().map(|c| c.original_text.as_str()).collect();
        assert_eq!(texts, vec!["b.com", "a.com", "b.com"]);
    }

    #[test]
    fn test_candidate_derived_fields() {
        let c = Candidate::new(" https://www.Globo.com/x ");
        assert_eq!(c.original_text, "https://www.Globo.com/x");
        assert_eq!(c.clean_domain.as_deref(), Some("globo.com"));
        assert_eq!(c.clean_name.as_deref(), Some("https://www.globo.com/x"));
    }

    #[test]
    fn test_unparsable_candidate_has_no_domain() {
        let c = Candidate::new("Folha de S.Paulo");
        assert_eq!(c.clean_domain, None);
        assert_eq!(c.clean_name.as_deref(), Some("folha de s.paulo"));
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_candidates("").is_empty());
        assert!(parse_candidates("\n  \n").is_empty());
    }
}
