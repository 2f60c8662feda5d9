// crates/ww_physics/src/epsilon.rs

//! 尾流扩展系数 epsilon 的标定求解
//!
//! 通过令双高斯尾流的质量流量亏损等于 Frandsen 致动盘参考尾流的
//! 质量流量亏损，把近尾流出口处的尾流宽度 `sig0` 标定为待求的
//! epsilon。求解方式为对平方残差做有界无导数一维最小化。
//!
//! # 单位约定
//!
//! 求解器内部 epsilon 以长度计（`sig0 = epsilon` [m]）；
//! 查找表与亏损引擎边界使用直径倍数 [D]，换算点唯一：
//! 引擎/建表处除以 d0。
//!
//! # 失败分级
//!
//! - `Ct` 不在 (0,1) 开区间、`d0 <= 0`：域错误，返回 `Err`
//! - 最小化不收敛：可恢复，返回 `Ok(NaN)` 并记录 warn 日志

use tracing::warn;
use ww_foundation::{ensure, WwError, WwResult, Scalar};

use crate::moments::{amplitude_cm, moment_m, moment_n};

// ============================================================
// 求解器配置
// ============================================================

/// epsilon 求解器配置
///
/// 仅容差与有界性是契约，具体一维最小化算法是实现选择。
#[derive(Debug, Clone, Copy)]
pub struct EpsilonSolverOptions {
    /// 自变量收敛容差 [m]
    pub xatol: Scalar,
    /// 最大迭代次数（黄金分割每次迭代收缩区间约 0.618 倍）
    pub max_iter: usize,
}

impl Default for EpsilonSolverOptions {
    fn default() -> Self {
        Self {
            xatol: 1e-8,
            max_iter: 200,
        }
    }
}

// ============================================================
// 质量流量亏损
// ============================================================

/// Frandsen 参考尾流的质量流量亏损（忽略空气密度因子）
///
/// `beta = 0.5·(1+√(1-Ct))/√(1-Ct)`
/// `mDot = (π/8)·d0²·beta·(1 - √(1 - (2/beta)·Ct))`
///
/// 要求 `Ct < 1`（`Ct = 1` 使 beta 奇异），由调用方保证。
///
/// - `d0`: 风轮直径 [m]
/// - `ct`: 推力系数 [-]
#[inline]
pub fn frandsen_mass_flow(d0: Scalar, ct: Scalar) -> Scalar {
    let beta = 0.5 * (1.0 + (1.0 - ct).sqrt()) / (1.0 - ct).sqrt();
    (std::f64::consts::PI / 8.0) * d0 * d0 * beta * (1.0 - (1.0 - (2.0 / beta) * ct).sqrt())
}

/// 双高斯尾流与 Frandsen 参考尾流质量流量亏损的平方残差
///
/// `sig0 = epsilon`（epsilon 以长度计 [m]），
/// `mDot_dg = π·M(sig0, r0)·Cm(M, N, Ct, d0)`。
///
/// - `epsilon`: 近尾流出口处尾流宽度 [m]
/// - `d0`: 风轮直径 [m]
/// - `ct`: 推力系数 [-]
/// - `r0`: 高斯极值点展向位置 [m]
#[inline]
pub fn mass_flow_residual(epsilon: Scalar, d0: Scalar, ct: Scalar, r0: Scalar) -> Scalar {
    let sig0 = epsilon;
    let m = moment_m(sig0, r0);
    let n = moment_n(sig0, r0);
    let cm = amplitude_cm(m, n, ct, d0);
    let mdot_dg = std::f64::consts::PI * m * cm;
    let diff = mdot_dg - frandsen_mass_flow(d0, ct);
    diff * diff
}

// ============================================================
// 有界一维最小化
// ============================================================

/// 求解 epsilon [m]（默认容差）
///
/// 见 [`compute_epsilon_with`]。
pub fn compute_epsilon(d0: Scalar, ct: Scalar, r0: Scalar) -> WwResult<Scalar> {
    compute_epsilon_with(d0, ct, r0, &EpsilonSolverOptions::default())
}

/// 求解 epsilon [m]
///
/// 在 `[1e-5, 10·d0]` 上对质量流量平方残差做黄金分割最小化。
/// 结果对 d0 等比缩放不变：固定 Ct 与 kr（即 r0/d0）时
/// `compute_epsilon(d0, Ct, kr·d0/2) / d0` 为常数。
///
/// # 错误
///
/// - `Ct` 不在 (0,1) 开区间：`WwError::OutOfRange`
/// - `d0 <= 0` 或 `r0 < 0`：`WwError::InvalidInput`
///
/// # 返回
///
/// 收敛时返回 epsilon [m]；不收敛时返回 NaN 并记录 warn 日志，
/// 由上游按 NaN 传播策略处理。
pub fn compute_epsilon_with(
    d0: Scalar,
    ct: Scalar,
    r0: Scalar,
    options: &EpsilonSolverOptions,
) -> WwResult<Scalar> {
    ensure!(
        ct > 0.0 && ct < 1.0,
        WwError::out_of_range("Ct", ct, 0.0, 1.0)
    );
    ensure!(
        d0.is_finite() && d0 > 0.0,
        WwError::invalid_input(format!("d0 必须为有限正数, 实际 d0={d0}"))
    );
    ensure!(
        r0.is_finite() && r0 >= 0.0,
        WwError::invalid_input(format!("r0 必须为非负有限数, 实际 r0={r0}"))
    );
    // 搜索区间 [1e-5, 10·d0] 必须非退化
    ensure!(
        10.0 * d0 > 1e-5,
        WwError::invalid_input(format!("d0 过小, 搜索区间退化: d0={d0}"))
    );

    // 残差中判别式为负的区域产生 NaN，按 +∞ 处理使其被搜索排除
    let f = |eps: Scalar| -> Scalar {
        let r = mass_flow_residual(eps, d0, ct, r0);
        if r.is_finite() {
            r
        } else {
            Scalar::INFINITY
        }
    };

    // 黄金分割搜索，搜索区间 [1e-5, 10·d0]
    const INVPHI: Scalar = 0.618_033_988_749_894_9;
    let mut a: Scalar = 1e-5;
    let mut b: Scalar = 10.0 * d0;

    let mut c = b - INVPHI * (b - a);
    let mut d = a + INVPHI * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);

    let mut converged = false;
    for _ in 0..options.max_iter {
        if (b - a).abs() <= options.xatol {
            converged = true;
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INVPHI * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INVPHI * (b - a);
            fd = f(d);
        }
    }

    // 取两个内点中残差较小者；残差最小值可能贴在判别式为零的
    // 域边界上，取内点保证返回值落在有效一侧
    let (epsilon, f_eps) = if fc < fd { (c, fc) } else { (d, fd) };
    if !converged || !f_eps.is_finite() {
        warn!("Epsilon could not be found for d0={}, Ct={}, r0={}", d0, ct, r0);
        return Ok(Scalar::NAN);
    }

    Ok(epsilon)
}
