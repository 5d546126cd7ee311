//! # VASP OUTCAR 解析器
//!
//! 从 OUTCAR 中提取每个离子步的原子力和应力张量。
//!
//! ## 提取的块
//! ```text
//!  POSITION                                       TOTAL-FORCE (eV/Angst)
//!  -----------------------------------------------------------------------------------
//!       0.00000      0.00000      0.00000         0.012345     -0.006789      0.000000
//!  ...
//!  -----------------------------------------------------------------------------------
//!
//!   in kB     -12.34567   -12.34567   -12.34567     0.00000     0.00000     0.00000
//! ```
//! `in kB` 行的分量顺序为 XX YY ZZ XY YZ ZX。
//!
//! ## 依赖关系
//! - 被 `collate/collator.rs` 使用
//! - 使用 `models/calculation.rs`

use crate::error::{FitprepError, Result};
use crate::models::{ForceSnapshot, StressTensor};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 一个 OUTCAR 中的全部力与应力
#[derive(Debug, Clone, Default)]
pub struct OutcarData {
    /// 每个离子步一组力
    pub forces: Vec<ForceSnapshot>,
    /// 每个离子步一个应力张量 (kBar)
    pub stresses: Vec<StressTensor>,
}

impl OutcarData {
    /// 最后一个离子步的力
    pub fn final_forces(&self) -> Option<&ForceSnapshot> {
        self.forces.last()
    }
}

/// 读取并解析 OUTCAR 文件
pub fn parse_outcar_file(path: &Path) -> Result<OutcarData> {
    let content = read_outcar(path)?;
    let name = path.display().to_string();

    Ok(OutcarData {
        forces: parse_forces(&content, &name)?,
        stresses: parse_stresses(&content, &name)?,
    })
}

/// 提取所有离子步的力
pub fn forces_from_outcar(path: &Path) -> Result<Vec<ForceSnapshot>> {
    let content = read_outcar(path)?;
    parse_forces(&content, &path.display().to_string())
}

/// 提取所有离子步的应力张量
pub fn stresses_from_outcar(path: &Path) -> Result<Vec<StressTensor>> {
    let content = read_outcar(path)?;
    parse_stresses(&content, &path.display().to_string())
}

fn read_outcar(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FitprepError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|e| FitprepError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

fn parse_error(path: &str, reason: impl Into<String>) -> FitprepError {
    FitprepError::ParseError {
        format: "outcar".to_string(),
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn is_separator(line: &str) -> bool {
    line.trim_start().starts_with("----")
}

/// 解析 TOTAL-FORCE 块
pub fn parse_forces(content: &str, path: &str) -> Result<Vec<ForceSnapshot>> {
    let mut snapshots = Vec::new();
    let mut lines = content.lines().enumerate();

    while let Some((_, line)) = lines.next() {
        if !line.contains("TOTAL-FORCE") {
            continue;
        }

        // 表头下方的分隔线
        match lines.next() {
            Some((_, l)) if is_separator(l) => {}
            _ => continue,
        }

        let mut snapshot = ForceSnapshot::new();
        for (lineno, row) in lines.by_ref() {
            if is_separator(row) {
                break;
            }
            let values: Vec<f64> = row
                .split_whitespace()
                .filter_map(|s| s.parse().ok())
                .collect();
            if values.len() < 6 {
                return Err(parse_error(
                    path,
                    format!("Malformed TOTAL-FORCE row at line {}", lineno + 1),
                ));
            }
            snapshot.push([values[3], values[4], values[5]]);
        }
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

fn float_regex() -> &'static Regex {
    static FLOAT: OnceLock<Regex> = OnceLock::new();
    // VASP 的定宽输出可能让负数首尾相连，如 "-1234.56789-234.56789"
    FLOAT.get_or_init(|| Regex::new(r"-?\d+\.\d+(?:[eE][-+]?\d+)?").unwrap())
}

/// 解析 `in kB` 应力行
pub fn parse_stresses(content: &str, path: &str) -> Result<Vec<StressTensor>> {
    let mut stresses = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let Some(rest) = line.trim_start().strip_prefix("in kB") else {
            continue;
        };

        let values: Vec<f64> = float_regex()
            .find_iter(rest)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if values.len() != 6 {
            return Err(parse_error(
                path,
                format!(
                    "Expected 6 stress components at line {}, found {}",
                    lineno + 1,
                    values.len()
                ),
            ));
        }

        stresses.push(StressTensor::from_vasp_order([
            values[0], values[1], values[2], values[3], values[4], values[5],
        ]));
    }

    Ok(stresses)
}
