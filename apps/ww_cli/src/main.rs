// apps/ww_cli/src/main.rs

//! WindWake 命令行界面
//!
//! 提供双高斯尾流模型的命令行工具：离线生成 epsilon 查找表，
//! 以及沿中心线求值亏损剖面。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// WindWake 双高斯尾流模型命令行工具
#[derive(Parser)]
#[command(name = "ww_cli")]
#[command(author = "WindWake Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "WindWake double-Gaussian wake deficit model", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成 epsilon 查找表并保存
    Generate(commands::generate::GenerateArgs),
    /// 求值中心线亏损剖面
    Eval(commands::eval::EvalArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Eval(args) => commands::eval::execute(args),
    }
}
