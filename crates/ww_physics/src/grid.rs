// crates/ww_physics/src/grid.rs

//! 评估点坐标网格
//!
//! 三个坐标数组（下游 x、横向 y、垂向 z），单位与风轮直径一致 [m]。
//! 遵循逐元素广播规则：每个数组长度为公共长度 n 或 1（标量广播），
//! 否则构造失败。`meshgrid` 辅助构造器生成三个轴的完整笛卡尔积，
//! 用于截面/体积积分。

use ww_foundation::{ensure, WwError, WwResult, Scalar};

/// 评估点坐标网格（不可变值类型）
#[derive(Debug, Clone)]
pub struct EvaluationGrid {
    /// 下游坐标 [m]
    x: Vec<Scalar>,
    /// 横向坐标 [m]
    y: Vec<Scalar>,
    /// 垂向坐标 [m]
    z: Vec<Scalar>,
    /// 广播后的公共长度
    len: usize,
}

impl EvaluationGrid {
    /// 从三个坐标数组创建
    ///
    /// 每个数组长度必须等于公共长度 n 或等于 1。
    ///
    /// # 错误
    ///
    /// 长度不满足广播规则时返回 `WwError::SizeMismatch`。
    pub fn new(x: Vec<Scalar>, y: Vec<Scalar>, z: Vec<Scalar>) -> WwResult<Self> {
        ensure!(
            !x.is_empty() && !y.is_empty() && !z.is_empty(),
            WwError::invalid_input("坐标数组不能为空")
        );

        let len = x.len().max(y.len()).max(z.len());
        WwError::check_size("x", if x.len() == 1 { 1 } else { len }, x.len())?;
        WwError::check_size("y", if y.len() == 1 { 1 } else { len }, y.len())?;
        WwError::check_size("z", if z.len() == 1 { 1 } else { len }, z.len())?;

        Ok(Self { x, y, z, len })
    }

    /// 生成三个轴的完整笛卡尔积网格
    ///
    /// 点序为 x 外层、y 中层、z 内层，共 `|xs|·|ys|·|zs|` 个点。
    pub fn meshgrid(xs: &[Scalar], ys: &[Scalar], zs: &[Scalar]) -> WwResult<Self> {
        ensure!(
            !xs.is_empty() && !ys.is_empty() && !zs.is_empty(),
            WwError::invalid_input("坐标轴不能为空")
        );

        let n = xs.len() * ys.len() * zs.len();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        for &xi in xs {
            for &yi in ys {
                for &zi in zs {
                    x.push(xi);
                    y.push(yi);
                    z.push(zi);
                }
            }
        }
        Self::new(x, y, z)
    }

    /// 广播后的评估点数量
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 取第 i 个评估点坐标 (x, y, z)（标量数组按广播取值）
    #[inline]
    pub fn at(&self, i: usize) -> (Scalar, Scalar, Scalar) {
        let pick = |arr: &[Scalar]| arr[if arr.len() == 1 { 0 } else { i }];
        (pick(&self.x), pick(&self.y), pick(&self.z))
    }

    /// 逐点迭代（广播展开后）
    pub fn iter(&self) -> impl Iterator<Item = (Scalar, Scalar, Scalar)> + '_ {
        (0..self.len).map(move |i| self.at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_lengths() {
        let grid = EvaluationGrid::new(vec![1.0, 2.0], vec![0.0, 0.5], vec![0.0, 0.0]).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.at(1), (2.0, 0.5, 0.0));
    }

    #[test]
    fn test_scalar_broadcast() {
        let grid = EvaluationGrid::new(vec![5.0], vec![-1.0, 0.0, 1.0], vec![0.0]).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.at(0), (5.0, -1.0, 0.0));
        assert_eq!(grid.at(2), (5.0, 1.0, 0.0));
    }

    #[test]
    fn test_incompatible_lengths_rejected() {
        let result = EvaluationGrid::new(vec![1.0, 2.0], vec![0.0, 0.0, 0.0], vec![0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(EvaluationGrid::new(vec![], vec![0.0], vec![0.0]).is_err());
    }

    #[test]
    fn test_meshgrid_cross_product() {
        let grid =
            EvaluationGrid::meshgrid(&[1.0], &[-1.0, 1.0], &[-2.0, 0.0, 2.0]).unwrap();
        assert_eq!(grid.len(), 6);
        // 内层 z 先变
        assert_eq!(grid.at(0), (1.0, -1.0, -2.0));
        assert_eq!(grid.at(1), (1.0, -1.0, 0.0));
        assert_eq!(grid.at(3), (1.0, 1.0, -2.0));
    }
}
