//! # 解析器模块
//!
//! 提供 VASP 结构文件和计算输出的解析器。
//!
//! ## 依赖关系
//! - 被 `collate/`, `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, outcar

pub mod outcar;
pub mod poscar;

pub use outcar::{forces_from_outcar, parse_outcar_file, stresses_from_outcar, OutcarData};
pub use poscar::{parse_poscar_file, to_poscar_string};
