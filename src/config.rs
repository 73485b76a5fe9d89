use crate::error::{Result, ScopeError};
use mailing_scope_common::export::excel_core::DEFAULT_SHEET_NAME;
use mailing_scope_common::report::DEFAULT_CANDIDATE_HEADER;
use mailing_scope_common::{ReportOptions, StatusAnchor, StatusLabels, DEFAULT_EXPORT_HOST};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSVエクスポートURLのホスト
    pub export_host: String,
    pub timeout_seconds: u64,
    pub sheet_name: String,
    pub output_file_name: String,
    pub candidate_header: String,
    pub in_scope_label: String,
    pub out_of_scope_label: String,
    pub status_anchor: StatusAnchor,
}

impl Default for Config {
    fn default() -> Self {
        let labels = StatusLabels::default();
        Self {
            export_host: DEFAULT_EXPORT_HOST.into(),
            timeout_seconds: 60,
            sheet_name: DEFAULT_SHEET_NAME.into(),
            output_file_name: "resultado_comparacao.xlsx".into(),
            candidate_header: DEFAULT_CANDIDATE_HEADER.into(),
            in_scope_label: labels.in_scope,
            out_of_scope_label: labels.out_of_scope,
            status_anchor: StatusAnchor::FirstColumn,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScopeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("mailing-scope").join("config.json"))
    }

    /// `KEY=VALUE` 形式で1項目を更新
    pub fn set_entry(&mut self, entry: &str) -> Result<()> {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| ScopeError::Config(format!("KEY=VALUE 形式で指定してください: {}", entry)))?;
        let value = value.trim().to_string();

        match key.trim() {
            "export_host" => self.export_host = value,
            "timeout_seconds" => {
                self.timeout_seconds = value
                    .parse()
                    .map_err(|_| ScopeError::Config(format!("数値ではありません: {}", value)))?
            }
            "sheet_name" => self.sheet_name = value,
            "output_file_name" => self.output_file_name = value,
            "candidate_header" => self.candidate_header = value,
            "in_scope_label" => self.in_scope_label = value,
            "out_of_scope_label" => self.out_of_scope_label = value,
            "status_anchor" => self.status_anchor = value.parse().map_err(ScopeError::Config)?,
            other => return Err(ScopeError::Config(format!("不明な設定項目: {}", other))),
        }
        Ok(())
    }

    /// レポート生成オプション
    pub fn report_options(&self, anchor: Option<StatusAnchor>) -> ReportOptions {
        ReportOptions {
            candidate_header: self.candidate_header.clone(),
            labels: StatusLabels {
                in_scope: self.in_scope_label.clone(),
                out_of_scope: self.out_of_scope_label.clone(),
            },
            anchor: anchor.unwrap_or(self.status_anchor),
        }
    }
}
