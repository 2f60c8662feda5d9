// crates/ww_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `WwError` 枚举和 `WwResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，IO 相关错误在 ww_io 中扩展
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **失败分级**: 致命错误返回 `Err`，可恢复的数值退化以 NaN + 日志表达
//!
//! # 示例
//!
//! ```
//! use ww_foundation::error::{WwError, WwResult};
//!
//! fn check_thrust(ct: f64) -> WwResult<()> {
//!     WwError::check_range("Ct", ct, 0.0, 1.0)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type WwResult<T> = Result<T, WwError>;

/// WindWake 错误类型
///
/// 核心错误类型，用于整个项目。文件读写相关的错误在 `ww_io` 中扩展。
#[derive(Error, Debug)]
pub enum WwError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl WwError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl WwError {
    /// 检查值是否在闭区间内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> WwResult<()> {
        if value < min || value > max || value.is_nan() {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> WwResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for WwError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// 条件检查宏：条件不满足时提前返回错误
///
/// ```
/// use ww_foundation::{ensure, error::{WwError, WwResult}};
///
/// fn check(d0: f64) -> WwResult<()> {
///     ensure!(d0 > 0.0, WwError::invalid_input("d0 必须为正"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WwError::invalid_config("Ct", "1.2", "必须小于 1");
        assert!(err.to_string().contains("配置值无效"));
        assert!(err.to_string().contains("Ct"));
    }

    #[test]
    fn test_out_of_range() {
        let err = WwError::out_of_range("kr", 1.5, 0.0, 1.0);
        assert!(err.to_string().contains("kr"));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_check_range() {
        assert!(WwError::check_range("value", 0.5, 0.0, 1.0).is_ok());
        assert!(WwError::check_range("value", -0.1, 0.0, 1.0).is_err());
        assert!(WwError::check_range("value", 1.1, 0.0, 1.0).is_err());
        assert!(WwError::check_range("value", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_check_size() {
        assert!(WwError::check_size("grid", 10, 10).is_ok());
        assert!(WwError::check_size("grid", 10, 5).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let ww_err: WwError = io_err.into();
        assert!(matches!(ww_err, WwError::Io { .. }));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: f64) -> WwResult<()> {
            ensure!(value > 0.0, WwError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1.0).is_ok());
        assert!(check(-1.0).is_err());
    }
}
