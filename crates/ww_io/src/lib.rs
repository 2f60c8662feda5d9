// crates/ww_io/src/lib.rs

//! WindWake IO 模块
//!
//! 提供 epsilon 查找表的持久化与加载回退。
//!
//! # 模块
//!
//! - [`error`]: IO 层错误类型
//! - [`table_store`]: 查找表的带版本 JSON 持久化
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use std::path::Path;
//! use ww_io::table_store::{load_table_or_recompute, save_table};
//! use ww_physics::{compute_deficit, EpsilonMode};
//!
//! // 表缺失时对用户可见地回退到现场求解
//! let field = match load_table_or_recompute(Path::new("epsilon_table.json")) {
//!     Some(table) => compute_deficit(&grid, &params, EpsilonMode::Table(&table))?,
//!     None => compute_deficit(&grid, &params, EpsilonMode::Recompute)?,
//! };
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod table_store;

// 重导出常用类型
pub use error::{TableStoreError, TableStoreResult};
pub use table_store::{load_table, load_table_or_recompute, save_table};
