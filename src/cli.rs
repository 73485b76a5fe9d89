use clap::{Args, Parser, Subcommand};
use mailing_scope_common::{MatchPlan, StatusAnchor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mailing-scope")]
#[command(about = "メーリングリスト照合・スコープ判定レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 参照シートの指定
#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// スプレッドシートの共有リンク
    #[arg(short, long, conflicts_with = "reference")]
    pub link: Option<String>,

    /// ローカルの参照ファイル（.csv / .xlsx）
    #[arg(short, long)]
    pub reference: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 候補リストを参照シートと照合してExcelレポートを出力
    Validate {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// 候補のテキストファイル（1行1件）
        #[arg(short, long, conflicts_with = "paste")]
        input: Option<PathBuf>,

        /// 標準入力から候補を貼り付け
        #[arg(long)]
        paste: bool,

        /// URLが入っている列名
        #[arg(long)]
        url_column: Option<String>,

        /// 媒体名が入っている列名
        #[arg(long)]
        name_column: Option<String>,

        /// 部分一致の検索対象列名
        #[arg(long)]
        search_column: Option<String>,

        /// 照合方式（優先順、カンマ区切り: domain/partial/name）
        #[arg(short, long, default_value = "domain")]
        strategy: MatchPlan,

        /// 判定基準 (first-column/join-key)
        #[arg(long)]
        anchor: Option<StatusAnchor>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 参照シートから媒体名を検索
    Search {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// 検索対象の列名（省略時は選択）
        #[arg(short, long)]
        column: Option<String>,

        /// 検索語
        #[arg(required = true)]
        term: String,

        /// 検索結果をExcelに保存
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 参照シートの列一覧を表示
    Headers {
        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// 対話モード（参照シートをセッション中キャッシュ）
    Session,

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 設定を変更（KEY=VALUE）
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}
