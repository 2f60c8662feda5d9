// crates/ww_foundation/src/lib.rs

//! WindWake Foundation Layer
//!
//! 零依赖基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`scalar`]: 统一标量类型和物理常量
//! - [`error`]: 统一错误类型
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **双精度契约**: 所有数值计算固定 f64
//! 3. **失败分级**: 参数域错误返回 `Err`，单点数值退化以 NaN 传播

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scalar;

// 重导出常用类型
pub use error::{WwError, WwResult};
pub use scalar::Scalar;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::ensure;
    pub use crate::error::{WwError, WwResult};
    pub use crate::scalar::Scalar;
}
