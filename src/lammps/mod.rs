//! # LAMMPS 输入模块
//!
//! 核-壳力场的 LAMMPS data 记录构建与写出。
//!
//! ## 依赖关系
//! - 被 `commands/collate.rs` 使用
//! - 使用 `models/`, `collate/`
//! - 子模块: builder, data

pub mod builder;
pub mod data;

pub use builder::LammpsDataBuilder;
pub use data::{to_lammps_data_string, AtomType, Bond, BondType, LammpsAtom, LammpsData, ParticleKind};
