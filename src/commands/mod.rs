//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `collate/`, `lammps/`, `parsers/`, `utils/`
//! - 子模块: collate, supercell

pub mod collate;
pub mod supercell;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Collate(args) => collate::execute(args),
        Commands::Supercell(args) => supercell::execute(args),
    }
}
