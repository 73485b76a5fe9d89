//! 対話モード
//!
//! 参照シートはセッションが持つキャッシュに保持し、リンクを変えると取り直す。
//! 各操作のエラーは表示だけして次の操作に戻る。

use crate::columns;
use crate::config::Config;
use crate::error::{Result, ScopeError};
use crate::input;
use crate::reference::ReferenceCache;
use crate::search;
use crate::validate::{self, ValidateOptions};
use dialoguer::{Input, Select};
use mailing_scope_common::{Candidate, ColumnRoles, MatchPlan, MatchStrategy, SheetId};
use std::path::PathBuf;

/// セッション状態
pub struct Session<'a> {
    config: &'a Config,
    verbose: bool,
    cache: ReferenceCache,
    sheet: Option<SheetId>,
    /// 選択済みの列（リンク変更で破棄）
    roles: ColumnRoles,
}

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    SetLink,
    ValidatePasted,
    ValidateFile,
    Search,
    ClearCache,
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 6] = [
        SessionAction::SetLink,
        SessionAction::ValidatePasted,
        SessionAction::ValidateFile,
        SessionAction::Search,
        SessionAction::ClearCache,
        SessionAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::SetLink => "参照シートのリンクを設定",
            SessionAction::ValidatePasted => "リンクを貼り付けて照合",
            SessionAction::ValidateFile => "テキストファイルから照合",
            SessionAction::Search => "媒体名を検索",
            SessionAction::ClearCache => "キャッシュをクリア",
            SessionAction::Quit => "終了",
        }
    }
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config, verbose: bool) -> Self {
        Self {
            config,
            verbose,
            cache: ReferenceCache::new(),
            sheet: None,
            roles: ColumnRoles::default(),
        }
    }

    /// メニューを繰り返し表示
    pub async fn run(&mut self) -> Result<()> {
        println!("🗂  mailing-scope - 対話モード\n");

        let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let default = if self.sheet.is_some() { 1 } else { 0 };
            let index = Select::new()
                .with_prompt("操作を選択")
                .items(&labels)
                .default(default)
                .interact()?;

            let action = SessionAction::ALL[index];
            if action == SessionAction::Quit {
                break;
            }

            if let Err(e) = self.dispatch(action).await {
                println!("❌ {}\n", e);
            }
        }

        println!("終了します");
        Ok(())
    }

    async fn dispatch(&mut self, action: SessionAction) -> Result<()> {
        match action {
            SessionAction::SetLink => self.set_link().await,
            SessionAction::ValidatePasted => {
                let text = prompt_multiline("リンクを1行に1件ずつ入力（空行で終了）")?;
                self.validate_text(&text).await
            }
            SessionAction::ValidateFile => {
                let path: String = Input::new()
                    .with_prompt("テキストファイルのパス")
                    .interact_text()?;
                let candidates = input::read_candidates(input::CandidateSource::File(
                    PathBuf::from(path.trim()).as_path(),
                ))?;
                self.validate_candidates(candidates).await
            }
            SessionAction::Search => self.search().await,
            SessionAction::ClearCache => {
                self.cache.clear();
                println!("✔ キャッシュをクリアしました\n");
                Ok(())
            }
            SessionAction::Quit => Ok(()),
        }
    }

    async fn set_link(&mut self) -> Result<()> {
        let link: String = Input::new()
            .with_prompt("スプレッドシートの共有リンク")
            .interact_text()?;
        let id = SheetId::from_link(&link)?;

        if self.sheet.as_ref() != Some(&id) {
            self.roles = ColumnRoles::default();
        }
        self.sheet = Some(id.clone());

        let table = self.cache.fetch(&id, self.config).await?;
        println!("✔ 参照シートを読み込みました: {}列 {}行", table.headers().len(), table.len());
        columns::print_headers(table);
        println!();
        Ok(())
    }

    fn current_sheet(&self) -> Result<SheetId> {
        self.sheet
            .clone()
            .ok_or_else(|| ScopeError::MissingInput("先に参照シートのリンクを設定してください".into()))
    }

    async fn validate_text(&mut self, text: &str) -> Result<()> {
        let candidates = input::candidates_from_text(text)?;
        self.validate_candidates(candidates).await
    }

    async fn validate_candidates(&mut self, candidates: Vec<Candidate>) -> Result<()> {
        let id = self.current_sheet()?;
        let plan = prompt_plan()?;
        let output: String = Input::new()
            .with_prompt("出力ファイル")
            .default(self.config.output_file_name.clone())
            .interact_text()?;

        let config = self.config;
        let table = self.cache.fetch(&id, config).await?;

        // 選んだ列は同じシートの次回以降も使う
        self.roles = columns::resolve_roles(table, &self.roles, &plan, true)?;

        let options = ValidateOptions {
            roles: self.roles.clone(),
            plan: plan.clone(),
            anchor: None,
            interactive: false,
        };
        let report = validate::build_report(table, &candidates, &options, config)?;

        let path = validate::save_report(&report, Some(PathBuf::from(output).as_path()), config)?;
        validate::print_summary(&report, &plan, self.verbose);
        println!("✔ レポートを保存: {}\n", path.display());
        Ok(())
    }

    async fn search(&mut self) -> Result<()> {
        let id = self.current_sheet()?;
        let term: String = Input::new().with_prompt("検索する媒体名").interact_text()?;

        let config = self.config;
        let table = self.cache.fetch(&id, config).await?;
        let column = match &self.roles.search_column {
            Some(column) => column.clone(),
            None => columns::select_column(table, MatchStrategy::Partial)?,
        };
        search::run_search(table, &column, &term, None, config)?;
        self.roles.search_column = Some(column);
        println!();
        Ok(())
    }
}

/// 照合方式を選択
fn prompt_plan() -> Result<MatchPlan> {
    let choices: [(&str, &[MatchStrategy]); 4] = [
        ("ドメイン完全一致", &[MatchStrategy::Domain]),
        ("ドメイン → 名前 (フォールバック)", &[MatchStrategy::Domain, MatchStrategy::Name]),
        ("名前完全一致", &[MatchStrategy::Name]),
        ("部分一致", &[MatchStrategy::Partial]),
    ];
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    let index = Select::new()
        .with_prompt("照合方式")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MatchPlan::new(choices[index].1.to_vec())?)
}

/// 空行まで複数行を入力
fn prompt_multiline(prompt: &str) -> Result<String> {
    println!("{}", prompt);
    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels_unique() {
        let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
        for (i, label) in labels.iter().enumerate() {
            assert!(!labels[..i].contains(label));
        }
        assert_eq!(SessionAction::ALL.last(), Some(&SessionAction::Quit));
    }

    #[test]
    fn test_missing_sheet() {
        let config = Config::default();
        let session = Session::new(&config, false);
        assert!(matches!(
            session.current_sheet().unwrap_err(),
            ScopeError::MissingInput(_)
        ));
    }
}
