//! # DFT 计算结果数据模型
//!
//! 存储从 VASP OUTCAR 提取的力与应力。
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs` 使用
//! - 被 `collate/`, `lammps/` 使用

use serde::{Deserialize, Serialize};

/// 一个离子步的力（每个位点一个向量，eV/Å）
pub type ForceSnapshot = Vec<[f64; 3]>;

/// 应力张量 (kBar)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressTensor {
    pub components: [[f64; 3]; 3],
}

impl StressTensor {
    /// 从 OUTCAR `in kB` 行的分量顺序 (XX YY ZZ XY YZ ZX) 构造对称张量
    pub fn from_vasp_order(v: [f64; 6]) -> Self {
        let [xx, yy, zz, xy, yz, zx] = v;
        StressTensor {
            components: [[xx, xy, zx], [xy, yy, yz], [zx, yz, zz]],
        }
    }

    /// 按 LAMMPS pressure 分量顺序 (xx yy zz xy xz yz) 展开
    pub fn lammps_order(&self) -> [f64; 6] {
        let c = self.components;
        [c[0][0], c[1][1], c[2][2], c[0][1], c[0][2], c[1][2]]
    }

    /// 换算为 bar (LAMMPS metal 单位)
    pub fn to_bar(&self) -> StressTensor {
        let mut components = self.components;
        for row in components.iter_mut() {
            for x in row.iter_mut() {
                *x *= 1000.0;
            }
        }
        StressTensor { components }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_from_vasp_order_is_symmetric() {
        let s = StressTensor::from_vasp_order([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(s.components[0][1], s.components[1][0]);
        assert_eq!(s.components[1][2], 5.0);
        assert_eq!(s.components[2][0], 6.0);
        assert_eq!(s.lammps_order(), [1.0, 2.0, 3.0, 4.0, 6.0, 5.0]);
    }

    #[test]
    fn test_stress_to_bar() {
        let s = StressTensor::from_vasp_order([-1.5, 0.0, 0.0, 0.0, 0.0, 0.0]).to_bar();
        assert!((s.components[0][0] + 1500.0).abs() < 1e-9);
    }
}
