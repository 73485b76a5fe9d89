use clap::Parser;
use mailing_scope::{cli, columns, config, error, input, reference, search, session, validate};
use cli::{Cli, Commands, ReferenceArgs};
use config::Config;
use error::Result;
use mailing_scope_common::{ColumnRoles, MatchStrategy};
use reference::ReferenceSource;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Validate {
            reference,
            input,
            paste,
            url_column,
            name_column,
            search_column,
            strategy,
            anchor,
            output,
        } => {
            println!("📋 mailing-scope - スコープ判定\n");

            // 入力元は読み込み前に確定させる
            let source = reference_source(&reference)?;
            let candidate_source = input::CandidateSource::from_args(input.as_deref(), paste)?;

            // 1. 参照シート
            println!("[1/4] 参照シートを読み込み中... ({})", source.describe());
            let table = reference::load_reference(&source, &config).await?;
            println!("✔ {}列 {}行\n", table.headers().len(), table.len());

            // 2. 候補
            println!("[2/4] 候補を読み込み中...");
            let candidates = input::read_candidates(candidate_source)?;
            println!("✔ {}件の候補\n", candidates.len());

            // 3. 照合
            println!("[3/4] 照合中... ({})", strategy);
            let options = validate::ValidateOptions {
                roles: ColumnRoles {
                    url_column,
                    name_column,
                    search_column,
                },
                plan: strategy.clone(),
                anchor,
                interactive: true,
            };
            let report = validate::build_report(&table, &candidates, &options, &config)?;
            validate::print_summary(&report, &strategy, cli.verbose);
            println!();

            // 4. 出力
            println!("[4/4] レポートを保存中...");
            let path = validate::save_report(&report, output.as_deref(), &config)?;
            println!("✔ レポートを保存: {}", path.display());

            println!("\n✅ 完了");
        }

        Commands::Search {
            reference,
            column,
            term,
            output,
        } => {
            let source = reference_source(&reference)?;
            let table = reference::load_reference(&source, &config).await?;

            let column = match column {
                Some(column) => column,
                None => columns::select_column(&table, MatchStrategy::Partial)?,
            };
            search::run_search(&table, &column, &term, output.as_deref(), &config)?;
        }

        Commands::Headers { reference } => {
            let source = reference_source(&reference)?;
            let table = reference::load_reference(&source, &config).await?;
            println!("{} の列:", source.describe());
            columns::print_headers(&table);
        }

        Commands::Session => {
            session::Session::new(&config, cli.verbose).run().await?;
        }

        Commands::Config { show, set, reset } => {
            let mut config = if reset { Config::default() } else { config };

            for entry in &set {
                config.set_entry(entry)?;
                println!("✔ 設定しました: {}", entry);
            }
            if reset || !set.is_empty() {
                config.save()?;
            }

            if show || (set.is_empty() && !reset) {
                println!("設定: {}", Config::config_path()?.display());
                println!("  export_host: {}", config.export_host);
                println!("  timeout_seconds: {}", config.timeout_seconds);
                println!("  sheet_name: {}", config.sheet_name);
                println!("  output_file_name: {}", config.output_file_name);
                println!("  candidate_header: {}", config.candidate_header);
                println!("  in_scope_label: {}", config.in_scope_label);
                println!("  out_of_scope_label: {}", config.out_of_scope_label);
                println!("  status_anchor: {}", config.status_anchor);
            }
        }
    }

    Ok(())
}

/// `-v` でdebug、RUST_LOG があればそちらを優先
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn reference_source(args: &ReferenceArgs) -> Result<ReferenceSource> {
    ReferenceSource::from_args(args.link.as_deref(), args.reference.as_deref())
}
