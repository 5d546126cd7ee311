//! # supercell 命令实现
//!
//! 读取一个 POSCAR，扩展为 a×b×c 超胞后写回 POSCAR 格式。
//!
//! ## 依赖关系
//! - 使用 `cli/supercell.rs` 定义的参数
//! - 使用 `parsers/poscar.rs`, `models/structure.rs`

use crate::cli::supercell::SupercellArgs;
use crate::error::{FitprepError, Result};
use crate::parsers::{parse_poscar_file, to_poscar_string};
use crate::utils::output;

use std::fs;

/// 执行 supercell 命令
pub fn execute(args: SupercellArgs) -> Result<()> {
    let dims: [u32; 3] = args.dims.as_slice().try_into().map_err(|_| {
        FitprepError::InvalidArgument(format!(
            "--dims needs exactly 3 values (x,y,z), got {}",
            args.dims.len()
        ))
    })?;

    let crystal = parse_poscar_file(&args.input)?;
    let supercell = crystal.supercell(dims)?;

    fs::write(&args.output, to_poscar_string(&supercell)).map_err(|e| {
        FitprepError::FileWriteError {
            path: args.output.display().to_string(),
            source: e,
        }
    })?;

    output::print_written(
        &args.input.display().to_string(),
        &args.output.display().to_string(),
    );
    output::print_done(&format!(
        "{} -> {} sites ({}x{}x{})",
        crystal.num_sites(),
        supercell.num_sites(),
        dims[0],
        dims[1],
        dims[2]
    ));

    Ok(())
}
