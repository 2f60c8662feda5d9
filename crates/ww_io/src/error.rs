// crates/ww_io/src/error.rs

//! IO 层错误类型

use std::path::PathBuf;
use thiserror::Error;
use ww_foundation::WwError;

/// 查找表持久化错误
#[derive(Error, Debug)]
pub enum TableStoreError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// JSON 编解码错误
    #[error("JSON 编解码错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 版本不兼容
    #[error("表格式版本不兼容: 文件版本 {file}, 当前版本 {current}")]
    Version {
        /// 文件内记录的版本
        file: u32,
        /// 当前支持的版本
        current: u32,
    },

    /// 表数据无效（轴或尺寸校验失败）
    #[error("表数据无效: {0}")]
    InvalidTable(#[from] WwError),
}

/// 查找表持久化操作结果
pub type TableStoreResult<T> = Result<T, TableStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableStoreError::Version { file: 9, current: 1 };
        assert!(err.to_string().contains("版本不兼容"));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_invalid_table_conversion() {
        let err: TableStoreError = WwError::size_mismatch("values", 4, 3).into();
        assert!(matches!(err, TableStoreError::InvalidTable(_)));
    }
}
