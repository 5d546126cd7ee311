//! # 收集配置
//!
//! 输入目录与命名约定。默认值对应 `poscars/POSCAR*` 与 `outcars/OUTCAR{i+1}`。
//!
//! ## 依赖关系
//! - 被 `collate/collator.rs`, `commands/collate.rs` 使用

use std::path::{Path, PathBuf};

/// 默认结构文件目录
pub const DEFAULT_POSCAR_DIR: &str = "poscars";
/// 默认计算输出目录
pub const DEFAULT_OUTCAR_DIR: &str = "outcars";
/// 默认结构文件 glob
pub const DEFAULT_STRUCTURE_PATTERN: &str = "POSCAR*";
/// 默认计算输出文件名前缀
pub const DEFAULT_OUTCAR_PREFIX: &str = "OUTCAR";

/// 收集配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollateConfig {
    /// 结构文件目录
    pub poscar_dir: PathBuf,
    /// 计算输出目录
    pub outcar_dir: PathBuf,
    /// 结构文件名 glob
    pub structure_pattern: String,
    /// 计算输出文件名前缀，后接 1 起始的序号
    pub outcar_prefix: String,
}

impl Default for CollateConfig {
    fn default() -> Self {
        CollateConfig {
            poscar_dir: PathBuf::from(DEFAULT_POSCAR_DIR),
            outcar_dir: PathBuf::from(DEFAULT_OUTCAR_DIR),
            structure_pattern: DEFAULT_STRUCTURE_PATTERN.to_string(),
            outcar_prefix: DEFAULT_OUTCAR_PREFIX.to_string(),
        }
    }
}

impl CollateConfig {
    /// 指定两个输入目录，命名约定取默认值
    pub fn new(poscar_dir: impl Into<PathBuf>, outcar_dir: impl Into<PathBuf>) -> Self {
        CollateConfig {
            poscar_dir: poscar_dir.into(),
            outcar_dir: outcar_dir.into(),
            ..Default::default()
        }
    }

    /// 以 `root/poscars` 与 `root/outcars` 为输入目录
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_POSCAR_DIR), root.join(DEFAULT_OUTCAR_DIR))
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.structure_pattern = pattern.into();
        self
    }

    pub fn with_outcar_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.outcar_prefix = prefix.into();
        self
    }

    /// 第 `index` 个结构（0 起始）对应的 OUTCAR 路径
    pub fn outcar_path(&self, index: usize) -> PathBuf {
        self.outcar_dir
            .join(format!("{}{}", self.outcar_prefix, index + 1))
    }
}
