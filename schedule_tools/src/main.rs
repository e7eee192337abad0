use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use production_schedule::status_cycle::next_status;
use schedule_manager::{
    application::{
        commands::{import_config, propose_schedule_with},
        dto::NextStatusDto,
    },
    AppServices,
};

mod load_config;

use load_config::{read_json_config, ConfigSource};

// 引数を構造体として定義します
#[derive(Parser)]
#[command(name = "schedule_tools")]
#[command(version = "0.1.0")]
#[command(about = "製造スケジュールの日付計算と設定ストアの操作をします", long_about = None)]
struct Cli {
    /// JSON の設定ファイル (statuses / rules / holidays)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite の設定ストア
    #[arg(long, global = true, env = "SCHEDULE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 基準日から各工程の予定日を計算します
    Resolve {
        /// 基準日 (DD/MM/YYYY)
        #[arg(short, long)]
        anchor_date: String,

        /// 基準ステータスのキー. 省略時は基準フラグの付いたステータス
        #[arg(short = 's', long)]
        anchor_status: Option<String>,
    },
    /// 次のステータスを表示します
    Advance {
        /// 現在のステータスのキー
        #[arg(short = 'k', long)]
        current: String,
    },
    /// JSON の設定をストアに書き込みます (--config と --db の両方が必要)
    Seed,
}

fn init_tracing() {
    // stdout は結果の JSON 用なのでログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve { anchor_date, anchor_status } => {
            let config = ConfigSource::pick(cli.config, cli.db)?.load().await?;
            let schedule = propose_schedule_with(&config, &anchor_date, anchor_status.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Commands::Advance { current } => {
            let config = ConfigSource::pick(cli.config, cli.db)?.load().await?;
            let next = next_status(&current, &config.statuses)?;
            let dto = NextStatusDto {
                key: next.key.clone(),
                is_final: next.is_final,
            };
            println!("{}", serde_json::to_string_pretty(&dto)?);
        }
        Commands::Seed => {
            let (Some(config_path), Some(db_path)) = (cli.config, cli.db) else {
                bail!("seed needs both --config and --db");
            };
            let config = read_json_config(&config_path)?;
            let services = AppServices::connect(&db_path)
                .await
                .with_context(|| format!("failed to open store {}", db_path.display()))?;
            let summary = import_config(&services, &config).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Cli::parse();

    // パターンマッチで分岐処理
    run(args).await
}
