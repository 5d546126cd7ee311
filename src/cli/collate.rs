//! # collate 子命令 CLI 定义
//!
//! 收集 POSCAR 与 OUTCAR，生成 LAMMPS data 文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collate.rs`

use crate::collate::config::{
    DEFAULT_OUTCAR_DIR, DEFAULT_OUTCAR_PREFIX, DEFAULT_POSCAR_DIR, DEFAULT_STRUCTURE_PATTERN,
};
use clap::Args;
use std::path::PathBuf;

/// collate 子命令参数
#[derive(Args, Debug)]
pub struct CollateArgs {
    /// JSON file with core_shell, charges, masses, cs_springs, bpp and sd parameters
    #[arg(long)]
    pub params: PathBuf,

    /// Directory containing the structure files
    #[arg(long, default_value = DEFAULT_POSCAR_DIR)]
    pub poscars: PathBuf,

    /// Directory containing OUTCAR1, OUTCAR2, ... (numbered by sorted structure order)
    #[arg(long, default_value = DEFAULT_OUTCAR_DIR)]
    pub outcars: PathBuf,

    /// Glob pattern for structure files
    #[arg(short, long, default_value = DEFAULT_STRUCTURE_PATTERN)]
    pub pattern: String,

    /// File name prefix of the calculation outputs
    #[arg(long, default_value = DEFAULT_OUTCAR_PREFIX)]
    pub outcar_prefix: String,

    /// Supercell expansion as JSON: '[2,2,1]' for all structures,
    /// or '[[1,1,1],[2,2,2]]' with one expansion per structure
    #[arg(short, long)]
    pub supercell: Option<String>,

    /// Output directory for the LAMMPS data files
    #[arg(short, long, default_value = "lammps")]
    pub output: PathBuf,

    /// CSV summary of the collated structures and expected stresses
    #[arg(long, default_value = "collated.csv")]
    pub summary: PathBuf,

    /// Number of parallel jobs for writing data files (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
