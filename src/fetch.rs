//! 参照スプレッドシートの取得
//!
//! 共有リンクをCSVエクスポートURLに変換してダウンロードし、表として読み込む。

use crate::config::Config;
use crate::error::{Result, ScopeError};
use indicatif::{ProgressBar, ProgressStyle};
use mailing_scope_common::{ReferenceTable, SheetId};
use std::time::Duration;

/// ドキュメントIDのCSVを取得して表に変換
pub async fn fetch_reference(id: &SheetId, config: &Config) -> Result<ReferenceTable> {
    let url = id.export_url(&config.export_host);
    log::debug!("GET {}", url);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("スプレッドシートを取得中...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = download_csv(&url, config.timeout_seconds).await;
    spinner.finish_and_clear();

    let body = result?;
    parse_csv_body(&body)
}

async fn download_csv(url: &str, timeout_seconds: u64) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("text/html"));

    let body = response.text().await?;
    if is_html {
        return Err(ScopeError::AccessDenied(url.to_string()));
    }
    Ok(body)
}

/// 取得したCSV本文を表に変換
///
/// 非公開シートではログイン画面のHTMLが返るため、CSVとして読む前に弾く。
pub fn parse_csv_body(body: &str) -> Result<ReferenceTable> {
    let head: String = body.trim_start().chars().take(15).collect::<String>().to_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Err(ScopeError::AccessDenied("HTMLが返されました".into()));
    }

    let table = ReferenceTable::from_csv_str(body)?;
    log::debug!(
        "参照テーブル: {}列 {}行",
        table.headers().len(),
        table.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 1回だけ応答するローカルHTTPサーバー
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/spreadsheets/d/abc/export?format=csv", addr)
    }

    #[tokio::test]
    async fn test_download_csv_ok() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 19\r\nConnection: close\r\n\r\nid,site\n1,globo.com",
        )
        .await;
        let body = download_csv(&url, 5).await.unwrap();
        assert_eq!(body, "id,site\n1,globo.com");
    }

    #[tokio::test]
    async fn test_download_html_is_access_denied() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<p>login</p>\n",
        )
        .await;
        let err = download_csv(&url, 5).await.unwrap_err();
        assert!(matches!(err, ScopeError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_download_error_status() {
        let url = serve_once(
            "HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let err = download_csv(&url, 5).await.unwrap_err();
        match err {
            ScopeError::Http(e) => assert_eq!(e.status(), Some(reqwest::StatusCode::FORBIDDEN)),
            other => panic!("Http expected: {}", other),
        }
    }

    #[test]
    fn test_parse_csv_body() {
        let table = parse_csv_body("id,site\n1,globo.com\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_html_body_is_access_denied() {
        let err = parse_csv_body("  <!DOCTYPE html><html><body>Sign in</body></html>").unwrap_err();
        assert!(matches!(err, ScopeError::AccessDenied(_)));
    }

    #[test]
    fn test_empty_body() {
        let err = parse_csv_body("").unwrap_err();
        assert!(matches!(
            err,
            ScopeError::Common(mailing_scope_common::Error::EmptyReference)
        ));
    }
}
