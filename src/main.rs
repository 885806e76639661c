mod attendance;
mod config;
mod database;
mod discovery;
mod entity;
mod meraki;
mod report;
mod usage;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{Config, Settings};
use crate::meraki::MerakiClient;

#[derive(Parser)]
#[command(name = "meraki-attendance", version, about = "Meraki 客户端用量 → 考勤库")]
struct Cli {
    /// 配置文件路径（不存在则使用默认配置）
    #[arg(long, default_value = "meraki-attendance.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // API 密钥缺失时直接退出，不做任何 I/O
    let api_key = config::api_key_from_env()?;
    let settings = Settings {
        api_key,
        config: Config::load(&cli.config)?,
    };

    init_tracing(settings.config.log_dir.as_deref());

    let start = Instant::now();
    info!("📋 考勤报表启动");

    let api = MerakiClient::new(&settings)?;
    let db = database::connect(&settings.config.database_url).await?;

    let summary = report::run_report(&api, &db, settings.config.backfill_days).await?;
    db.close().await?;

    info!(
        "✅ 报表完成: {} 个网络，写入 {} 行",
        summary.networks, summary.rows_written
    );
    info!("总耗时: {:?}", start.elapsed());

    Ok(())
}

/// 初始化 tracing 日志系统，配置了日志目录时按天轮转写文件
fn init_tracing(log_dir: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx::query=warn"));

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, "meraki_attendance.log");
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(file_appender).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }
}
