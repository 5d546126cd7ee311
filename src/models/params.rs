//! # 力场参数
//!
//! 核-壳模型力场参数集，从 JSON 文件读取后原样交给构建器。
//!
//! ## JSON 格式
//! ```text
//! {
//!   "core_shell": { "Li": false, "O": true },
//!   "charges":    { "Li": 1.0, "O": { "core": 0.96, "shell": -2.96 } },
//!   "masses":     { "Li": 6.941, "O": { "core": 14.3991, "shell": 1.5999 } },
//!   "cs_springs": { "O-O": [65.0, 0.0] },
//!   "bpp":        { "Li-O": [663.111, 0.119, 0.0] },
//!   "sd":         { "Li-O": [1.0, 1.0] }
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `collate/`, `lammps/` 使用

use crate::error::{FitprepError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 单值，或核/壳分开的两个值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SplitValue {
    Single(f64),
    CoreShell { core: f64, shell: f64 },
}

impl SplitValue {
    /// 核（或整个原子）的值
    pub fn core(&self) -> f64 {
        match *self {
            SplitValue::Single(v) => v,
            SplitValue::CoreShell { core, .. } => core,
        }
    }

    /// 壳的值；单值时壳取 0
    pub fn shell(&self) -> f64 {
        match *self {
            SplitValue::Single(_) => 0.0,
            SplitValue::CoreShell { shell, .. } => shell,
        }
    }
}

/// 力场参数集
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceFieldParams {
    /// 元素是否拆分为核-壳
    #[serde(default)]
    pub core_shell: BTreeMap<String, bool>,

    /// 电荷 (e)
    #[serde(default)]
    pub charges: BTreeMap<String, SplitValue>,

    /// 质量 (amu)
    #[serde(default)]
    pub masses: BTreeMap<String, SplitValue>,

    /// 核-壳弹簧常数 (k2, k4)
    #[serde(default)]
    pub cs_springs: BTreeMap<String, Vec<f64>>,

    /// Buckingham 对势参数 (A, rho, C)，键为 "Li-O" 形式
    #[serde(default)]
    pub bpp: BTreeMap<String, Vec<f64>>,

    /// 软化距离参数，键为 "Li-O" 形式
    #[serde(default)]
    pub sd: BTreeMap<String, Vec<f64>>,
}

impl ForceFieldParams {
    /// 从 JSON 文件读取
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FitprepError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn is_core_shell(&self, label: &str) -> bool {
        self.core_shell.get(label).copied().unwrap_or(false)
    }

    pub fn charge(&self, label: &str) -> Result<SplitValue> {
        self.charges
            .get(label)
            .copied()
            .ok_or_else(|| missing("charge", label))
    }

    pub fn mass(&self, label: &str) -> Result<SplitValue> {
        self.masses
            .get(label)
            .copied()
            .ok_or_else(|| missing("mass", label))
    }

    /// 核-壳弹簧常数，先查 "O-O" 再查 "O"
    pub fn spring(&self, label: &str) -> Result<&[f64]> {
        self.cs_springs
            .get(&format!("{label}-{label}"))
            .or_else(|| self.cs_springs.get(label))
            .map(|v| v.as_slice())
            .ok_or_else(|| missing("core-shell spring", label))
    }
}

fn missing(kind: &str, label: &str) -> FitprepError {
    FitprepError::MissingParameter {
        kind: kind.to_string(),
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = r#"{
        "core_shell": { "Li": false, "O": true },
        "charges": { "Li": 1.0, "O": { "core": 0.96, "shell": -2.96 } },
        "masses": { "Li": 6.941, "O": { "core": 14.3991, "shell": 1.5999 } },
        "cs_springs": { "O-O": [65.0, 0.0] },
        "bpp": { "Li-O": [663.111, 0.119, 0.0] },
        "sd": { "Li-O": [1.0, 1.0] }
    }"#;

    #[test]
    fn test_parse_params_json() {
        let params: ForceFieldParams = serde_json::from_str(PARAMS).unwrap();

        assert!(params.is_core_shell("O"));
        assert!(!params.is_core_shell("Li"));
        assert!(!params.is_core_shell("Ni"));

        let o = params.charge("O").unwrap();
        assert_eq!(o, SplitValue::CoreShell { core: 0.96, shell: -2.96 });
        assert_eq!(params.charge("Li").unwrap(), SplitValue::Single(1.0));
        assert_eq!(params.spring("O").unwrap(), &[65.0, 0.0]);
        assert_eq!(params.bpp["Li-O"], vec![663.111, 0.119, 0.0]);
    }

    #[test]
    fn test_missing_parameter() {
        let params: ForceFieldParams = serde_json::from_str(PARAMS).unwrap();
        let err = params.mass("Ni").unwrap_err();
        assert_eq!(err.to_string(), "Missing mass parameter for 'Ni'");
    }

    #[test]
    fn test_spring_fallback_to_single_label() {
        let params: ForceFieldParams =
            serde_json::from_str(r#"{ "cs_springs": { "O": [20.0, 1.0] } }"#).unwrap();
        assert_eq!(params.spring("O").unwrap(), &[20.0, 1.0]);
    }
}
