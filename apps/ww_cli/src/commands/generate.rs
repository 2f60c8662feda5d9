// apps/ww_cli/src/commands/generate.rs

//! 生成 epsilon 查找表命令
//!
//! 在 (Ct, kr) 网格上并行标定 epsilon 并保存为 JSON。
//! 这是昂贵的离线步骤，求值端通过加载该表摊销标定开销。

use anyhow::{ensure, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use ww_io::save_table;
use ww_physics::EpsilonTable;

/// 生成查找表参数
#[derive(Args)]
pub struct GenerateArgs {
    /// 输出文件路径
    #[arg(short, long, default_value = "epsilon_table.json")]
    pub output: PathBuf,

    /// Ct 轴步长（轴覆盖开区间 (0,1)）
    #[arg(long, default_value = "0.01")]
    pub ct_step: f64,

    /// kr 轴步长（轴覆盖闭区间 [0,1]）
    #[arg(long, default_value = "0.01")]
    pub kr_step: f64,
}

/// 执行生成命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    info!("=== WindWake epsilon 建表 ===");
    ensure!(
        args.ct_step > 0.0 && args.ct_step <= 0.5,
        "Ct 步长必须在 (0, 0.5] 内"
    );
    ensure!(
        args.kr_step > 0.0 && args.kr_step <= 0.5,
        "kr 步长必须在 (0, 0.5] 内"
    );

    // Ct 轴取开区间 (0,1) 内的等距点，kr 轴覆盖 [0,1]
    let n_ct = (1.0 / args.ct_step).round() as usize;
    let ct_axis: Vec<f64> = (1..n_ct).map(|i| i as f64 * args.ct_step).collect();
    let n_kr = (1.0 / args.kr_step).round() as usize;
    let kr_axis: Vec<f64> = (0..=n_kr).map(|i| (i as f64 * args.kr_step).min(1.0)).collect();

    info!(
        "网格: Ct {} 点 x kr {} 点, 共 {} 次标定求解",
        ct_axis.len(),
        kr_axis.len(),
        ct_axis.len() * kr_axis.len()
    );

    let start = Instant::now();
    let table = EpsilonTable::build(ct_axis, kr_axis).context("建表失败")?;
    info!("建表耗时: {:.2} s", start.elapsed().as_secs_f64());

    if table.nan_count() > 0 {
        info!("未解出格点数: {}", table.nan_count());
    }

    save_table(&table, &args.output).context("保存查找表失败")?;
    info!("=== 完成: {} ===", args.output.display());
    Ok(())
}
