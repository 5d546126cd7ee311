//! # 收集模块
//!
//! 把 POSCAR 与对应 OUTCAR 的力、应力配对，按需扩展超胞，
//! 再交给记录构建器，得到与结构文件顺序一致的记录列表。
//!
//! ## 依赖关系
//! - 被 `commands/collate.rs` 使用
//! - 使用 `parsers/`, `models/`
//! - 子模块: config, supercell, builder, collator

pub mod builder;
pub mod collator;
pub mod config;
pub mod supercell;

pub use builder::RecordBuilder;
pub use collator::{collate, Collator};
pub use config::CollateConfig;
pub use supercell::SupercellSpec;
