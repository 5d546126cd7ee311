//! # supercell 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/supercell.rs`

use clap::Args;
use std::path::PathBuf;

/// supercell 子命令参数
#[derive(Args, Debug)]
pub struct SupercellArgs {
    /// Input POSCAR/CONTCAR file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Expansion along a, b and c, e.g. 2,2,1
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub dims: Vec<u32>,

    /// Output POSCAR file
    #[arg(short, long, default_value = "POSCAR_supercell")]
    pub output: PathBuf,
}
