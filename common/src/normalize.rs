//! 照合キー正規化モジュール
//!
//! URLからドメイン、媒体名から比較用の名前を導出する。
//! どちらも純粋関数で、失敗は `None` として返しエラーにはしない。

use url::Url;

/// URL風の文字列からドメインを抽出
///
/// - 前後の空白除去・小文字化
/// - スキームがなければ `http://` を補う
/// - ホスト部を取り出し、先頭の `www.` を1つだけ除去
///
/// サブドメインは保持する（`esportes.globo.com` と `globo.com` は別物）。
/// 入力がない・解析できない・ホストが空の場合は `None`。
pub fn clean_domain(raw: Option<&str>) -> Option<String> {
    let lowered = raw?.trim().to_lowercase();

    let with_scheme = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        lowered
    } else {
        format!("http://{}", lowered)
    };

    let parsed = match Url::parse(&with_scheme) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("ドメイン抽出失敗 '{}': {}", with_scheme, e);
            return None;
        }
    };

    let host = parsed.host_str()?;
    let domain = host.strip_prefix("www.").unwrap_or(host);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// 名前比較用に正規化（小文字化・前後空白除去）
pub fn clean_name(raw: Option<&str>) -> Option<String> {
    let name = raw?.trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(s: &str) -> Option<String> {
        clean_domain(Some(s))
    }

    #[test]
    fn test_strips_www_prefix() {
        assert_eq!(domain("https://www.exemplo.com/x"), Some("exemplo.com".into()));
        assert_eq!(domain("www.exemplo.com"), Some("exemplo.com".into()));
    }

    #[test]
    fn test_adds_missing_scheme() {
        assert_eq!(domain("globo.com"), Some("globo.com".into()));
        assert_eq!(domain("globo.com/noticias?id=1"), Some("globo.com".into()));
    }

    #[test]
    fn test_subdomains_preserved() {
        assert_eq!(domain("http://esportes.globo.com"), Some("esportes.globo.com".into()));
        assert_eq!(domain("http://globo.com"), Some("globo.com".into()));
        assert_ne!(domain("http://esportes.globo.com"), domain("http://globo.com"));
    }

    #[test]
    fn test_only_leading_www_removed() {
        assert_eq!(domain("http://www.www.site.com"), Some("www.site.com".into()));
        assert_eq!(domain("http://blog.www.site.com"), Some("blog.www.site.com".into()));
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(domain("  HTTPS://WWW.UOL.COM.BR/  "), Some("uol.com.br".into()));
    }

    #[test]
    fn test_port_and_credentials_dropped() {
        assert_eq!(domain("http://user:pw@www.site.com:8080/a"), Some("site.com".into()));
    }

    #[test]
    fn test_numeric_host_is_rewritten_as_ipv4() {
        // 数値だけのホストはIPv4として解釈される（参照側も同じ変換を受ける）
        assert_eq!(domain("123"), Some("0.0.0.123".into()));
        assert_eq!(domain("http://123"), domain("123"));
    }

    #[test]
    fn test_no_dots() {
        assert_eq!(domain("localhost"), Some("localhost".into()));
    }

    #[test]
    fn test_failures_return_none() {
        assert_eq!(clean_domain(None), None);
        assert_eq!(domain(""), None);
        assert_eq!(domain("   "), None);
        assert_eq!(domain("http://"), None);
        assert_eq!(domain("exa mple.com"), None);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name(Some("  Folha de S.Paulo ")), Some("folha de s.paulo".into()));
        assert_eq!(clean_name(Some("   ")), None);
        assert_eq!(clean_name(None), None);
    }
}
