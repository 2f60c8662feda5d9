// crates/ww_physics/src/deficit.rs

//! 双高斯尾流亏损引擎
//!
//! 顶层入口：给定评估点网格与模型参数，解析 epsilon（现场求解或
//! 查表插值），计算尾流扩展剖面 sigma(x)，在每个评估点求双高斯
//! 亏损。整个求值是确定的纯函数，逐点独立、无调用间状态。
//!
//! # NaN 策略
//!
//! 单点的幅值判别式为负或 epsilon 解析失败时，该点亏损为 NaN，
//! 保留不钳制、不置零（NaN 意为"此点未定义"，不是零亏损）。
//! 单点失败不会中止其余点的求值。

use tracing::warn;
use ww_foundation::{WwResult, Scalar};

use crate::epsilon::compute_epsilon;
use crate::grid::EvaluationGrid;
use crate::moments::{amplitude_cm, moment_m, moment_n};
use crate::params::WakeParams;
use crate::table::EpsilonTable;

/// epsilon 解析方式
///
/// 带标签变体取代"布尔 + 可选查表"的搭配，从类型上排除
/// "不现场求解但又没有提供表"的组合。
#[derive(Debug, Clone, Copy)]
pub enum EpsilonMode<'a> {
    /// 现场求解（每次调用一次有界标量最小化）
    Recompute,
    /// 查预建表（双线性插值，只读共享）
    Table(&'a EpsilonTable),
}

/// 尾流亏损场
///
/// 每个评估点一个无量纲亏损值；尾流速度 = 自由流速度 × (1 - 亏损)。
/// 解析失败的点为 NaN。参数极端时亏损可略超物理区间 [0,1]，
/// 按契约不再钳制。
#[derive(Debug, Clone)]
pub struct DeficitField {
    values: Vec<Scalar>,
    nan_count: usize,
}

impl DeficitField {
    /// 亏损值 [-]，与评估网格逐点对应
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// NaN（未定义）点数量
    pub fn nan_count(&self) -> usize {
        self.nan_count
    }

    /// 评估点数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 取出亏损值数组
    pub fn into_values(self) -> Vec<Scalar> {
        self.values
    }
}

/// 计算双高斯尾流亏损场
///
/// 1. `r0 = kr·d0/2` [m]
/// 2. 解析 epsilon [D]：Recompute 路径现场求解（求解器内部以
///    长度计，在此边界除以 d0 换算为直径倍数）；Table 路径直接
///    查表（表内已是直径倍数）
/// 3. 逐点 `sig = k·(x - x0·d0) + epsilon_D·d0`，`r = √(y²+z²)`
/// 4. 逐点 `deficit = 0.5·Cm·(exp(-(r+r0)²/(2σ²)) + exp(-(r-r0)²/(2σ²)))`
///
/// # 错误
///
/// 参数域错误（`Ct ∉ (0,1)` 等）与查表超域是致命错误，返回 `Err`；
/// 单点数值失败降级为该点 NaN，并汇总为一条 warn 日志。
pub fn compute_deficit(
    grid: &EvaluationGrid,
    params: &WakeParams,
    mode: EpsilonMode<'_>,
) -> WwResult<DeficitField> {
    params.validate()?;

    let r0 = params.r0();

    // epsilon 解析，统一为直径倍数 [D]；唯一的单位换算点
    let epsilon_d = match mode {
        EpsilonMode::Recompute => compute_epsilon(params.d0, params.ct, r0)? / params.d0,
        EpsilonMode::Table(table) => table.lookup(params.ct, params.kr)?,
    };

    let mut values = Vec::with_capacity(grid.len());
    let mut nan_count = 0usize;
    for (x, y, z) in grid.iter() {
        let sig = params.k * (x - params.x0 * params.d0) + epsilon_d * params.d0;
        let r = (y * y + z * z).sqrt();
        let m = moment_m(sig, r0);
        let n = moment_n(sig, r0);
        let cm = amplitude_cm(m, n, params.ct, params.d0);
        let two_sig_sq = 2.0 * sig * sig;
        let deficit = 0.5
            * cm
            * ((-(r + r0) * (r + r0) / two_sig_sq).exp()
                + (-(r - r0) * (r - r0) / two_sig_sq).exp());
        if deficit.is_nan() {
            nan_count += 1;
        }
        values.push(deficit);
    }

    if nan_count > 0 {
        warn!(
            "Deficit could not be computed in every location! ({} of {} points)",
            nan_count,
            values.len()
        );
    }

    Ok(DeficitField { values, nan_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibrated_params(ct: Scalar, d0: Scalar) -> WakeParams {
        WakeParams::new(ct, d0)
    }

    fn centerline_at(x: Scalar) -> EvaluationGrid {
        EvaluationGrid::new(vec![x], vec![0.0], vec![0.0]).unwrap()
    }

    #[test]
    fn test_centerline_deficit_positive() {
        let params = calibrated_params(0.75, 1.1);
        let grid = centerline_at(5.0 * params.d0);
        let field = compute_deficit(&grid, &params, EpsilonMode::Recompute).unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field.nan_count(), 0);
        assert!(field.values()[0] > 0.0);
    }

    #[test]
    fn test_deficit_decays_downstream() {
        let params = calibrated_params(0.75, 1.1);
        let grid = EvaluationGrid::new(
            vec![3.0 * params.d0, 6.0 * params.d0, 12.0 * params.d0],
            vec![0.0],
            vec![0.0],
        )
        .unwrap();
        let field = compute_deficit(&grid, &params, EpsilonMode::Recompute).unwrap();
        let v = field.values();
        assert!(v[0] > v[1]);
        assert!(v[1] > v[2]);
    }

    #[test]
    fn test_deficit_lateral_symmetry() {
        let params = calibrated_params(0.6, 2.0);
        let grid = EvaluationGrid::new(
            vec![4.0 * params.d0],
            vec![-0.7, 0.7],
            vec![0.0],
        )
        .unwrap();
        let field = compute_deficit(&grid, &params, EpsilonMode::Recompute).unwrap();
        let v = field.values();
        assert!((v[0] - v[1]).abs() < 1e-14);
    }

    #[test]
    fn test_invalid_thrust_rejected() {
        let params = calibrated_params(1.0, 1.1);
        let grid = centerline_at(5.0);
        assert!(compute_deficit(&grid, &params, EpsilonMode::Recompute).is_err());
    }

    #[test]
    fn test_table_lookup_out_of_domain_is_fatal() {
        let table = EpsilonTable::build(vec![0.3, 0.5], vec![0.4, 0.6]).unwrap();
        // kr 默认值 0.5347 超出表的 kr 轴范围
        let params = calibrated_params(0.4, 1.1).with_shape(0.9, 1.1031, 0.0103793);
        let grid = centerline_at(5.0);
        assert!(compute_deficit(&grid, &params, EpsilonMode::Table(&table)).is_err());
    }

    #[test]
    fn test_near_wake_nan_propagates() {
        // 大扩展斜率下，转子平面附近 sigma 很小，幅值判别式为负
        let params = calibrated_params(0.75, 1.1).with_shape(0.534_720, 1.1031, 0.2);
        let grid = EvaluationGrid::new(
            vec![0.0, 8.0 * params.d0],
            vec![0.0],
            vec![0.0],
        )
        .unwrap();
        let field = compute_deficit(&grid, &params, EpsilonMode::Recompute).unwrap();
        // 近处点退化为 NaN 而不是中止其余点的求值
        assert!(field.values()[0].is_nan());
        assert!(field.values()[1].is_finite());
        assert_eq!(field.nan_count(), 1);
    }
}
