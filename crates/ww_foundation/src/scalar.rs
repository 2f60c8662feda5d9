// crates/ww_foundation/src/scalar.rs

//! 统一标量类型
//!
//! 尾流模型的数值契约要求双精度计算，因此 `Scalar` 固定为 f64，
//! 不提供 f32 切换。所有物理量的单位在各自文档中以方括号标注
//! （[m] 长度、[D] 直径倍数、[-] 无量纲）。

/// 计算用标量类型（固定 f64，双精度为模型契约）
pub type Scalar = f64;

/// 物理常量
pub mod constants {
    use super::Scalar;

    /// 圆周率
    pub const PI: Scalar = std::f64::consts::PI;
    /// 标准空气密度 (kg/m³)
    pub const AIR_DENSITY: Scalar = 1.225;
}
