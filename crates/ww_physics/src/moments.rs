// crates/ww_physics/src/moments.rs

//! 双高斯速度剖面的闭式矩函数
//!
//! 提供 M、N 两个径向积分矩以及亏损幅值 Cm 的逐点求值。
//! 三个函数均为纯函数，无状态、无副作用，双精度计算。
//!
//! # 单位约定
//!
//! - `sig`: 尾流宽度 σ [m]
//! - `r0`: 高斯极值点展向位置 [m]
//! - `M`, `N`: 径向矩 [m²]
//! - `Cm`: 幅值 [-]

use statrs::function::erf::erf;
use ww_foundation::Scalar;

/// √(2π)
const SQRT_2PI: Scalar = 2.506_628_274_631_000_5;

/// 计算径向矩 M [m²]
///
/// `M = 2σ²·exp(-r0²/(2σ²)) + √(2π)·r0·σ·erf(r0/(σ√2))`
///
/// - `sig`: 尾流宽度 σ [m]
/// - `r0`: 高斯极值点展向位置 [m]
#[inline]
pub fn moment_m(sig: Scalar, r0: Scalar) -> Scalar {
    2.0 * sig * sig * (-(r0 * r0) / (2.0 * sig * sig)).exp()
        + SQRT_2PI * r0 * sig * erf(r0 / (sig * std::f64::consts::SQRT_2))
}

/// 计算径向矩 N [m²]
///
/// `N = σ²·exp(-r0²/σ²) + (√π/2)·r0·σ·erf(r0/σ)`
///
/// - `sig`: 尾流宽度 σ [m]
/// - `r0`: 高斯极值点展向位置 [m]
#[inline]
pub fn moment_n(sig: Scalar, r0: Scalar) -> Scalar {
    sig * sig * (-(r0 * r0) / (sig * sig)).exp()
        + 0.5 * std::f64::consts::PI.sqrt() * r0 * sig * erf(r0 / sig)
}

/// 计算亏损幅值 Cm [-]（幅值二次方程的"负"根）
///
/// `Cm = (M - √(M² - 0.5·N·Ct·d0²)) / (2N)`
///
/// 只取负根；正根分支不具物理意义，不采用。
/// 判别式为负时结果为 NaN，按 NaN 传播策略交由上游处理，不在此报错。
///
/// - `m`: 径向矩 M [m²]
/// - `n`: 径向矩 N [m²]
/// - `ct`: 推力系数 [-]
/// - `d0`: 风轮直径 [m]
#[inline]
pub fn amplitude_cm(m: Scalar, n: Scalar, ct: Scalar, d0: Scalar) -> Scalar {
    let below_sqrt = m * m - 0.5 * n * ct * d0 * d0;
    (m - below_sqrt.sqrt()) / (2.0 * n)
}
