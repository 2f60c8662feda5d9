// crates/ww_physics/src/params.rs

//! 尾流模型物理参数
//!
//! `WakeParams` 是不可变值类型，构造后只读。形状参数 kr/x0/k 的
//! 默认值取自参考标定，可按机组另行标定后覆盖。

use serde::{Deserialize, Serialize};
use ww_foundation::{ensure, WwError, WwResult, Scalar};

/// 标定默认值：高斯极值点位置 kr [-]
fn default_kr() -> Scalar {
    0.534_720
}

/// 标定默认值：流管出口位置 x0 [D]
fn default_x0() -> Scalar {
    1.1031
}

/// 标定默认值：尾流扩展斜率 k [-]
fn default_k() -> Scalar {
    0.010_379_3
}

/// 双高斯尾流模型的物理参数
///
/// # 不变量
///
/// - `0 < ct < 1` 严格成立（`ct = 1` 使 Frandsen 参考尾流奇异）
/// - `d0 > 0`
/// - `0 <= kr <= 1`
/// - `k > 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WakeParams {
    /// 推力系数 [-]
    pub ct: Scalar,
    /// 风轮直径 [m]
    pub d0: Scalar,
    /// 高斯极值点位置（0: 尾流中心，1: 叶尖）[-]
    #[serde(default = "default_kr")]
    pub kr: Scalar,
    /// 流管出口位置 [D]
    #[serde(default = "default_x0")]
    pub x0: Scalar,
    /// 尾流扩展斜率 [-]
    #[serde(default = "default_k")]
    pub k: Scalar,
}

impl WakeParams {
    /// 用参考标定的形状参数创建
    pub fn new(ct: Scalar, d0: Scalar) -> Self {
        Self {
            ct,
            d0,
            kr: default_kr(),
            x0: default_x0(),
            k: default_k(),
        }
    }

    /// 覆盖形状参数 (kr [-], x0 [D], k [-])
    pub fn with_shape(mut self, kr: Scalar, x0: Scalar, k: Scalar) -> Self {
        self.kr = kr;
        self.x0 = x0;
        self.k = k;
        self
    }

    /// 高斯极值点展向位置 r0 [m]
    #[inline]
    pub fn r0(&self) -> Scalar {
        self.kr * self.d0 / 2.0
    }

    /// 校验参数域
    pub fn validate(&self) -> WwResult<()> {
        ensure!(
            self.ct > 0.0 && self.ct < 1.0,
            WwError::out_of_range("Ct", self.ct, 0.0, 1.0)
        );
        ensure!(
            self.d0.is_finite() && self.d0 > 0.0,
            WwError::invalid_config("d0", self.d0.to_string(), "风轮直径必须为有限正数")
        );
        WwError::check_range("kr", self.kr, 0.0, 1.0)?;
        ensure!(
            self.x0.is_finite(),
            WwError::invalid_config("x0", self.x0.to_string(), "流管出口位置必须为有限数")
        );
        ensure!(
            self.k.is_finite() && self.k > 0.0,
            WwError::invalid_config("k", self.k.to_string(), "尾流扩展斜率必须为有限正数")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrated_defaults() {
        let params = WakeParams::new(0.75, 1.1);
        assert!((params.kr - 0.534_720).abs() < 1e-12);
        assert!((params.x0 - 1.1031).abs() < 1e-12);
        assert!((params.k - 0.010_379_3).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_r0_is_half_kr_diameter() {
        let params = WakeParams::new(0.75, 2.0).with_shape(0.5, 1.0, 0.01);
        assert!((params.r0() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_thrust_coefficient_must_be_below_one() {
        assert!(WakeParams::new(1.0, 1.1).validate().is_err());
        assert!(WakeParams::new(0.999, 1.1).validate().is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(WakeParams::new(0.75, -1.0).validate().is_err());
        assert!(WakeParams::new(0.75, 1.1).with_shape(1.5, 1.0, 0.01).validate().is_err());
        assert!(WakeParams::new(0.75, 1.1).with_shape(0.5, 1.0, -0.01).validate().is_err());
    }

    #[test]
    fn test_serde_defaults_fill_shape() {
        let params: WakeParams = serde_json::from_str(r#"{"ct": 0.75, "d0": 126.0}"#).unwrap();
        assert!((params.kr - 0.534_720).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }
}
