//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `collate`: 收集 POSCAR/OUTCAR 并写出 LAMMPS data 文件
//! - `supercell`: 单个 POSCAR 的超胞扩展
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: collate, supercell

pub mod collate;
pub mod supercell;

use clap::{Parser, Subcommand};

/// fitprep - 力场拟合数据准备
#[derive(Parser)]
#[command(name = "fitprep")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Collate VASP structures, forces and stresses into LAMMPS inputs for force-field fitting", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Pair POSCARs with OUTCAR forces/stresses and write LAMMPS data files
    Collate(collate::CollateArgs),

    /// Expand a single POSCAR into a supercell
    Supercell(supercell::SupercellArgs),
}
