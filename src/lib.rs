//! # fitprep - 力场拟合数据准备
//!
//! 将 VASP 结构 (POSCAR) 与计算输出 (OUTCAR) 中的力、应力配对，
//! 可选扩展为超胞，并生成核-壳力场拟合用的 LAMMPS 输入。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── collate/    (收集流程、超胞规格、构建器接口)
//!   ├── lammps/     (LAMMPS 记录构建与写出)
//!   ├── parsers/    (POSCAR / OUTCAR 解析器)
//!   ├── models/     (数据模型)
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── utils/      (输出与进度条)
//!   └── error.rs    (错误处理)
//! ```

pub mod cli;
pub mod collate;
pub mod commands;
pub mod error;
pub mod lammps;
pub mod models;
pub mod parsers;
pub mod utils;

pub use collate::{collate, CollateConfig, Collator, RecordBuilder, SupercellSpec};
pub use error::{FitprepError, Result};
pub use lammps::{LammpsData, LammpsDataBuilder};
pub use models::{Crystal, ForceFieldParams};
