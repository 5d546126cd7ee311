//! # fitprep 命令行入口
//!
//! ## 子命令
//! - `collate`   - 收集 POSCAR/OUTCAR 并写出 LAMMPS data 文件
//! - `supercell` - 将单个 POSCAR 扩展为超胞

use clap::Parser;
use fitprep::cli::Cli;
use fitprep::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
