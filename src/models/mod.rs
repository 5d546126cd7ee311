//! # 数据模型模块
//!
//! 定义晶体结构、DFT 计算结果和力场参数的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `collate/`, `lammps/` 使用
//! - 子模块: structure, calculation, params

pub mod calculation;
pub mod params;
pub mod structure;

pub use calculation::{ForceSnapshot, StressTensor};
pub use params::{ForceFieldParams, SplitValue};
pub use structure::{Atom, Crystal, LammpsPrism, Lattice, SiteProperty, FORCES};
