//! Slacktastic CLI
//!
//! 通过 Slack Incoming Webhook 发送文本消息和图表

use anyhow::Result;
use clap::{Parser, Subcommand};
use slacktastic::cli::{deliver, ChartArgs, DeliveryOptions};
use slacktastic::{Message, SendResult};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "slacktastic")]
#[command(about = "Slacktastic - 通过 Slack Incoming Webhook 发送统计消息")]
#[command(version)]
struct Cli {
    /// Webhook 地址（默认读取配置文件或 SLACK_WEBHOOK_URL）
    #[arg(long, global = true)]
    webhook_url: Option<String>,

    /// 只打印 payload，不发送
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送纯文本消息
    Send {
        /// 消息文本（支持 mrkdwn）
        #[arg(long, short)]
        text: String,
    },
    /// 发送带图表的消息
    Chart(ChartArgs),
    /// 只输出图表图片地址
    Url(ChartArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slacktastic=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let options = DeliveryOptions {
        webhook_url: cli.webhook_url,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Send { text } => {
            let message = Message::builder().text(text).build()?;
            report(deliver(&message, &options).await?);
        }
        Commands::Chart(args) => {
            let chart = args.build()?;
            let mut builder = Message::builder().attachment(chart);
            if let Some(text) = args.text.clone() {
                builder = builder.text(text);
            }
            let message = builder.build()?;
            report(deliver(&message, &options).await?);
        }
        Commands::Url(args) => {
            let chart = args.build()?;
            if let Some(url) = chart.image_url() {
                println!("{}", url);
            }
        }
    }

    Ok(())
}

fn report(result: SendResult) {
    match result {
        SendResult::Sent => info!("Done"),
        SendResult::Skipped(reason) => info!(reason = %reason, "Skipped sending"),
    }
}
