// crates/ww_physics/src/table.rs

//! epsilon 二维查找表
//!
//! 在 (Ct, kr) 轴的笛卡尔积上重复调用 epsilon 求解器，建成一张
//! 不可变的二维采样表，并提供双线性插值查询。建表是昂贵的可缓存
//! 步骤（每个格点一次标量求解），各格点相互独立，按行并行计算。
//!
//! # 单位约定
//!
//! 表内 epsilon 存储为直径倍数 [D]。由求解器的尺度不变性，建表
//! 使用的参考直径 `D0_REFERENCE` 取任意正值等价，取 1.0。
//!
//! # 域边界
//!
//! 查询超出任一轴范围是域错误，不做外推。

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ww_foundation::{ensure, WwError, WwResult, Scalar};

use crate::epsilon::{compute_epsilon_with, EpsilonSolverOptions};

/// 建表用参考直径 [m]（任意正值等价，见模块文档）
pub const D0_REFERENCE: Scalar = 1.0;

/// epsilon 二维采样表（不可变，建成后只读共享）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpsilonTable {
    /// 推力系数轴 [-]（严格单调递增，取值于 (0,1) 开区间）
    ct_axis: Vec<Scalar>,
    /// 极值点位置轴 [-]（严格单调递增，取值于 [0,1]）
    kr_axis: Vec<Scalar>,
    /// epsilon 值 [D]，行优先 (ct × kr)
    values: Vec<Scalar>,
}

impl EpsilonTable {
    /// 在给定轴上建表（默认求解器容差）
    pub fn build(ct_axis: Vec<Scalar>, kr_axis: Vec<Scalar>) -> WwResult<Self> {
        Self::build_with(ct_axis, kr_axis, &EpsilonSolverOptions::default())
    }

    /// 在给定轴上建表
    ///
    /// 每个 (Ct, kr) 格点独立求解 `r0 = kr·D0_REFERENCE/2` 处的
    /// epsilon 并按直径倍数存储。格点间无顺序依赖，按 Ct 行并行。
    /// 求解失败的格点存 NaN 并计入日志。
    pub fn build_with(
        ct_axis: Vec<Scalar>,
        kr_axis: Vec<Scalar>,
        options: &EpsilonSolverOptions,
    ) -> WwResult<Self> {
        validate_axis("Ct", &ct_axis)?;
        validate_axis("kr", &kr_axis)?;
        ensure!(
            ct_axis[0] > 0.0,
            WwError::out_of_range("Ct", ct_axis[0], 0.0, 1.0)
        );
        ensure!(
            ct_axis[ct_axis.len() - 1] < 1.0,
            WwError::out_of_range("Ct", ct_axis[ct_axis.len() - 1], 0.0, 1.0)
        );
        WwError::check_range("kr", kr_axis[0], 0.0, 1.0)?;
        WwError::check_range("kr", kr_axis[kr_axis.len() - 1], 0.0, 1.0)?;

        let values = ct_axis
            .par_iter()
            .flat_map_iter(|&ct| {
                kr_axis.iter().map(move |&kr| {
                    let r0 = kr * D0_REFERENCE / 2.0;
                    compute_epsilon_with(D0_REFERENCE, ct, r0, options)
                        .map(|epsilon| epsilon / D0_REFERENCE)
                })
            })
            .collect::<WwResult<Vec<Scalar>>>()?;

        let table = Self {
            ct_axis,
            kr_axis,
            values,
        };
        let failed = table.nan_count();
        if failed > 0 {
            warn!(
                "Epsilon table built with {} unresolved cells out of {}",
                failed,
                table.values.len()
            );
        } else {
            info!(
                "Epsilon table built: {} x {} cells",
                table.ct_axis.len(),
                table.kr_axis.len()
            );
        }
        Ok(table)
    }

    /// 从已有数据重建（持久化加载路径）
    ///
    /// 校验轴与数据尺寸的一致性，不重新求解。
    pub fn from_parts(
        ct_axis: Vec<Scalar>,
        kr_axis: Vec<Scalar>,
        values: Vec<Scalar>,
    ) -> WwResult<Self> {
        validate_axis("Ct", &ct_axis)?;
        validate_axis("kr", &kr_axis)?;
        WwError::check_size("values", ct_axis.len() * kr_axis.len(), values.len())?;
        Ok(Self {
            ct_axis,
            kr_axis,
            values,
        })
    }

    /// 参考生成网格：Ct 0.01..=0.99、kr 0.00..=1.00，步长均 0.01
    pub fn default_axes() -> (Vec<Scalar>, Vec<Scalar>) {
        let ct_axis = (1..=99).map(|i| i as Scalar * 0.01).collect();
        let kr_axis = (0..=100).map(|i| i as Scalar * 0.01).collect();
        (ct_axis, kr_axis)
    }

    /// 双线性插值查询 epsilon [D]
    ///
    /// # 错误
    ///
    /// (Ct, kr) 超出任一轴范围时返回 `WwError::OutOfRange`，
    /// 不做外推。
    pub fn lookup(&self, ct: Scalar, kr: Scalar) -> WwResult<Scalar> {
        let (i, t_ct) = locate("Ct", &self.ct_axis, ct)?;
        let (j, t_kr) = locate("kr", &self.kr_axis, kr)?;

        let nkr = self.kr_axis.len();
        let v00 = self.values[i * nkr + j];
        let v01 = self.values[i * nkr + j + 1];
        let v10 = self.values[(i + 1) * nkr + j];
        let v11 = self.values[(i + 1) * nkr + j + 1];

        // 双线性混合；任一角点 NaN 时结果 NaN，按策略传播
        let v0 = v00 + t_kr * (v01 - v00);
        let v1 = v10 + t_kr * (v11 - v10);
        Ok(v0 + t_ct * (v1 - v0))
    }

    /// 推力系数轴 [-]
    pub fn ct_axis(&self) -> &[Scalar] {
        &self.ct_axis
    }

    /// 极值点位置轴 [-]
    pub fn kr_axis(&self) -> &[Scalar] {
        &self.kr_axis
    }

    /// epsilon 值 [D]（行优先 ct × kr）
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// 未能求解的格点数量
    pub fn nan_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

/// 校验轴：非空、至少两点、严格单调递增、全部有限
fn validate_axis(name: &'static str, axis: &[Scalar]) -> WwResult<()> {
    ensure!(
        axis.len() >= 2,
        WwError::invalid_input(format!("{name} 轴至少需要两个采样点, 实际 {}", axis.len()))
    );
    for i in 0..axis.len() {
        ensure!(
            axis[i].is_finite(),
            WwError::invalid_input(format!("{name} 轴含非有限值: axis[{i}]={}", axis[i]))
        );
        if i > 0 {
            ensure!(
                axis[i] > axis[i - 1],
                WwError::invalid_input(format!(
                    "{name} 轴必须严格单调递增: axis[{}]={} <= axis[{}]={}",
                    i,
                    axis[i],
                    i - 1,
                    axis[i - 1]
                ))
            );
        }
    }
    Ok(())
}

/// 在轴上定位查询值：返回左端点下标 i 与归一化权重 t ∈ [0,1]
///
/// 超出 [axis[0], axis[n-1]] 为域错误。
fn locate(name: &'static str, axis: &[Scalar], q: Scalar) -> WwResult<(usize, Scalar)> {
    let n = axis.len();
    if !(q >= axis[0] && q <= axis[n - 1]) {
        return Err(WwError::out_of_range(name, q, axis[0], axis[n - 1]));
    }

    // 二分查找左端点，右边界查询落入最后一个区间
    let i = axis.partition_point(|&v| v <= q).saturating_sub(1).min(n - 2);
    let t = (q - axis[i]) / (axis[i + 1] - axis[i]);
    Ok((i, t))
}
