//! 照合候補の入力
//!
//! テキストファイル（1行1件）または標準入力への貼り付けから読み込む。

use crate::error::{Result, ScopeError};
use mailing_scope_common::{parse_candidates, Candidate};
use std::io::Read;
use std::path::Path;

/// 候補の入力元
#[derive(Debug, Clone, Copy)]
pub enum CandidateSource<'a> {
    File(&'a Path),
    Paste,
}

impl<'a> CandidateSource<'a> {
    pub fn from_args(file: Option<&'a Path>, paste: bool) -> Result<Self> {
        match (file, paste) {
            (Some(path), _) => Ok(Self::File(path)),
            (None, true) => Ok(Self::Paste),
            (None, false) => Err(ScopeError::MissingInput(
                "--input でファイルを指定するか、--paste でリンクを貼り付けてください".into(),
            )),
        }
    }
}

/// 候補リストを読み込み（空ならエラー）
pub fn read_candidates(source: CandidateSource<'_>) -> Result<Vec<Candidate>> {
    let text = match source {
        CandidateSource::File(path) => read_text_file(path)?,
        CandidateSource::Paste => {
            eprintln!("リンクを1行に1件ずつ貼り付け、Ctrl-D (Windows: Ctrl-Z) で終了:");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    candidates_from_text(&text)
}

/// テキストから候補リストを作成（空ならエラー）
pub fn candidates_from_text(text: &str) -> Result<Vec<Candidate>> {
    let candidates = parse_candidates(text);
    if candidates.is_empty() {
        return Err(ScopeError::MissingInput("照合する候補がありません".into()));
    }
    Ok(candidates)
}

fn read_text_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ScopeError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}
