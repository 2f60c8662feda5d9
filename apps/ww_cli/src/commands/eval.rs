// apps/ww_cli/src/commands/eval.rs

//! 求值中心线亏损剖面命令
//!
//! 沿尾流中心线（y = z = 0）在给定下游范围内求亏损剖面。
//! 查找表缺失时对用户可见地回退到现场求解。

use anyhow::{ensure, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use ww_io::load_table_or_recompute;
use ww_physics::{compute_deficit, EpsilonMode, EvaluationGrid, WakeParams};

/// 求值亏损剖面参数
#[derive(Args)]
pub struct EvalArgs {
    /// epsilon 查找表路径（缺失时回退到现场求解）
    #[arg(long, default_value = "epsilon_table.json")]
    pub table: PathBuf,

    /// 推力系数 [-]
    #[arg(long)]
    pub ct: f64,

    /// 风轮直径 [m]
    #[arg(long)]
    pub d0: f64,

    /// 高斯极值点位置 [-]（默认参考标定值）
    #[arg(long, default_value = "0.534720")]
    pub kr: f64,

    /// 流管出口位置 [D]（默认参考标定值）
    #[arg(long, default_value = "1.1031")]
    pub x0: f64,

    /// 尾流扩展斜率 [-]（默认参考标定值）
    #[arg(long, default_value = "0.0103793")]
    pub k: f64,

    /// 下游起点 [D]
    #[arg(long, default_value = "2.0")]
    pub x_start: f64,

    /// 下游终点 [D]
    #[arg(long, default_value = "10.0")]
    pub x_end: f64,

    /// 采样点数
    #[arg(long, default_value = "9")]
    pub samples: usize,
}

/// 执行求值命令
pub fn execute(args: EvalArgs) -> Result<()> {
    info!("=== WindWake 亏损剖面求值 ===");
    ensure!(args.samples >= 2, "采样点数至少为 2");
    ensure!(args.x_end > args.x_start, "下游终点必须大于起点");

    let params = WakeParams::new(args.ct, args.d0).with_shape(args.kr, args.x0, args.k);
    params.validate().context("参数无效")?;

    // 中心线网格：x 等距采样，y = z = 0
    let dx = (args.x_end - args.x_start) / (args.samples - 1) as f64;
    let x: Vec<f64> = (0..args.samples)
        .map(|i| (args.x_start + i as f64 * dx) * args.d0)
        .collect();
    let grid = EvaluationGrid::new(x.clone(), vec![0.0], vec![0.0])
        .context("构造评估网格失败")?;

    // 表缺失是合法状态，回退到现场求解
    let table = load_table_or_recompute(&args.table);
    let mode = match &table {
        Some(table) => EpsilonMode::Table(table),
        None => EpsilonMode::Recompute,
    };

    let field = compute_deficit(&grid, &params, mode).context("亏损求值失败")?;

    info!(
        "Ct={}, d0={} m, kr={}, x0={} D, k={}",
        params.ct, params.d0, params.kr, params.x0, params.k
    );
    for (xi, deficit) in x.iter().zip(field.values()) {
        println!("x = {:8.3} m ({:5.2} D): deficit = {:.6}", xi, xi / args.d0, deficit);
    }
    if field.nan_count() > 0 {
        info!("未定义点数: {}", field.nan_count());
    }

    Ok(())
}
