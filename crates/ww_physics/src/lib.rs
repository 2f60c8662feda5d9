// crates/ww_physics/src/lib.rs

//! WindWake 物理层
//!
//! 双高斯解析尾流亏损模型：两条叠加的高斯瓣，其幅值与展宽按
//! "双高斯质量流量亏损 = Frandsen 致动盘参考亏损" 标定。模型是
//! 推力系数、风轮直径与三个形状参数的纯函数，在任意下游评估点
//! 求值。
//!
//! # 模块概览
//!
//! - [`moments`]: 闭式矩函数 M、N 与幅值 Cm
//! - [`epsilon`]: 尾流扩展系数 epsilon 的有界标定求解
//! - [`table`]: epsilon 在 (Ct, kr) 网格上的并行建表与双线性插值
//! - [`params`]: 物理参数值类型与域校验
//! - [`grid`]: 评估点坐标网格与广播规则
//! - [`deficit`]: 顶层亏损引擎
//!
//! # 数据流
//!
//! `deficit` → (`epsilon` | `table`) → `moments` → 亏损场；
//! `table` 内部依赖 `epsilon` 填充网格。
//!
//! # 使用示例
//!
//! ```
//! use ww_physics::{compute_deficit, EpsilonMode, EvaluationGrid, WakeParams};
//!
//! let params = WakeParams::new(0.75, 1.1);
//! let grid = EvaluationGrid::new(vec![5.0 * params.d0], vec![0.0], vec![0.0])?;
//! let field = compute_deficit(&grid, &params, EpsilonMode::Recompute)?;
//! assert!(field.values()[0] > 0.0);
//! # Ok::<(), ww_foundation::WwError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deficit;
pub mod epsilon;
pub mod grid;
pub mod moments;
pub mod params;
pub mod table;

// 重导出常用类型
pub use deficit::{compute_deficit, DeficitField, EpsilonMode};
pub use epsilon::{compute_epsilon, EpsilonSolverOptions};
pub use grid::EvaluationGrid;
pub use params::WakeParams;
pub use table::{EpsilonTable, D0_REFERENCE};
