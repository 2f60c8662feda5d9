// crates/ww_io/src/table_store.rs

//! epsilon 查找表的持久化
//!
//! 表以带版本号的 JSON 文档保存：
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "ct_axis": [...],      // 推力系数轴 [-]
//!   "kr_axis": [...],      // 极值点位置轴 [-]
//!   "values": [...]        // epsilon [D]，行优先，未解出的格点为 null
//! }
//! ```
//!
//! 加载时校验版本与数据一致性。表文件缺失是合法状态：
//! [`load_table_or_recompute`] 在缺失或不可读时返回 `None` 并记录
//! warn 日志，调用方转用现场求解路径（`EpsilonMode::Recompute`）。
//! 不提供进程级全局懒加载，表对象由调用方显式持有并注入。

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ww_foundation::Scalar;
use ww_physics::EpsilonTable;

use crate::error::{TableStoreError, TableStoreResult};

/// 表文件格式版本
const TABLE_FORMAT_VERSION: u32 = 1;

/// 持久化文档（JSON 不能表示 NaN，未解出格点存 null）
#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    format_version: u32,
    ct_axis: Vec<Scalar>,
    kr_axis: Vec<Scalar>,
    values: Vec<Option<Scalar>>,
}

/// 保存查找表为 JSON 文件
pub fn save_table(table: &EpsilonTable, path: &Path) -> TableStoreResult<()> {
    let doc = TableDocument {
        format_version: TABLE_FORMAT_VERSION,
        ct_axis: table.ct_axis().to_vec(),
        kr_axis: table.kr_axis().to_vec(),
        values: table
            .values()
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect(),
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, &doc)?;
    info!("Epsilon table saved to {}", path.display());
    Ok(())
}

/// 从 JSON 文件加载查找表
///
/// # 错误
///
/// - 文件不存在：`TableStoreError::FileNotFound`
/// - 版本不兼容：`TableStoreError::Version`
/// - 轴/尺寸校验失败：`TableStoreError::InvalidTable`
pub fn load_table(path: &Path) -> TableStoreResult<EpsilonTable> {
    if !path.exists() {
        return Err(TableStoreError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let doc: TableDocument = serde_json::from_reader(reader)?;

    if doc.format_version != TABLE_FORMAT_VERSION {
        return Err(TableStoreError::Version {
            file: doc.format_version,
            current: TABLE_FORMAT_VERSION,
        });
    }

    let values = doc
        .values
        .into_iter()
        .map(|v| v.unwrap_or(Scalar::NAN))
        .collect();
    let table = EpsilonTable::from_parts(doc.ct_axis, doc.kr_axis, values)?;
    info!(
        "Epsilon table loaded from {} ({} x {} cells)",
        path.display(),
        table.ct_axis().len(),
        table.kr_axis().len()
    );
    Ok(table)
}

/// 加载查找表，缺失或不可读时回退
///
/// 返回 `None` 表示调用方应转用现场求解路径；回退原因以 warn
/// 日志对用户可见，不视为错误。
pub fn load_table_or_recompute(path: &Path) -> Option<EpsilonTable> {
    match load_table(path) {
        Ok(table) => Some(table),
        Err(err) => {
            warn!(
                "Epsilon lookup table unavailable ({}), falling back to on-the-fly solving",
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// 测试临时文件路径（进程内唯一）
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ww_table_store_{}_{}.json", std::process::id(), name))
    }

    fn build_small_table() -> EpsilonTable {
        EpsilonTable::build(vec![0.4, 0.6], vec![0.3, 0.7]).unwrap()
    }

    #[test]
    fn test_save_then_load_preserves_lookup() {
        let path = temp_path("roundtrip");
        let table = build_small_table();
        save_table(&table, &path).unwrap();

        let loaded = load_table(&path).unwrap();
        let a = table.lookup(0.5, 0.5).unwrap();
        let b = loaded.lookup(0.5, 0.5).unwrap();
        assert!((a - b).abs() < 1e-15);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = temp_path("missing_does_not_exist");
        let result = load_table(&path);
        assert!(matches!(result, Err(TableStoreError::FileNotFound { .. })));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = temp_path("fallback_does_not_exist");
        assert!(load_table_or_recompute(&path).is_none());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let path = temp_path("bad_version");
        let doc = TableDocument {
            format_version: 99,
            ct_axis: vec![0.4, 0.6],
            kr_axis: vec![0.3, 0.7],
            values: vec![Some(0.2); 4],
        };
        let file = File::create(&path).unwrap();
        serde_json::to_writer(BufWriter::new(file), &doc).unwrap();

        let result = load_table(&path);
        assert!(matches!(result, Err(TableStoreError::Version { file: 99, .. })));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_sizes_rejected() {
        let path = temp_path("bad_sizes");
        let doc = TableDocument {
            format_version: TABLE_FORMAT_VERSION,
            ct_axis: vec![0.4, 0.6],
            kr_axis: vec![0.3, 0.7],
            values: vec![Some(0.2); 3],
        };
        let file = File::create(&path).unwrap();
        serde_json::to_writer(BufWriter::new(file), &doc).unwrap();

        let result = load_table(&path);
        assert!(matches!(result, Err(TableStoreError::InvalidTable(_))));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unresolved_cells_survive_persistence() {
        let path = temp_path("nan_cells");
        let mut values = vec![0.2; 4];
        values[2] = f64::NAN;
        let table = EpsilonTable::from_parts(vec![0.4, 0.6], vec![0.3, 0.7], values).unwrap();
        save_table(&table, &path).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.nan_count(), 1);

        std::fs::remove_file(&path).ok();
    }
}
