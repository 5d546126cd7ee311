//! # LAMMPS data 记录
//!
//! 一个结构的 LAMMPS 输入记录，以及 `atom_style full` data 文件的写出。
//!
//! ## 依赖关系
//! - 被 `lammps/builder.rs`, `commands/collate.rs` 使用
//! - 使用 `models/calculation.rs`

use crate::models::StressTensor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 粒子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// 不拆分的刚性离子
    Atom,
    Core,
    Shell,
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleKind::Atom => write!(f, "atom"),
            ParticleKind::Core => write!(f, "core"),
            ParticleKind::Shell => write!(f, "shell"),
        }
    }
}

/// 原子类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomType {
    pub id: usize,
    pub element: String,
    pub kind: ParticleKind,
    pub mass: f64,
    pub charge: f64,
}

impl AtomType {
    /// 如 "Li"、"O core"、"O shell"
    pub fn label(&self) -> String {
        match self.kind {
            ParticleKind::Atom => self.element.clone(),
            kind => format!("{} {}", self.element, kind),
        }
    }
}

/// 核-壳键类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondType {
    pub id: usize,
    pub element: String,
    /// 弹簧常数 (k2, k4)
    pub spring: Vec<f64>,
}

/// LAMMPS 粒子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LammpsAtom {
    pub id: usize,
    /// 核与壳共享同一个 molecule id（对应位点序号 + 1）
    pub molecule: usize,
    pub type_id: usize,
    pub charge: f64,
    /// LAMMPS 坐标系下的笛卡尔坐标 (Å)
    pub position: [f64; 3],
    /// DFT 力 (eV/Å)；壳为零
    pub force: [f64; 3],
}

/// 核-壳键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub id: usize,
    pub type_id: usize,
    /// [核 id, 壳 id]
    pub atoms: [usize; 2],
}

/// 一个结构的 LAMMPS 输入记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LammpsData {
    pub file_name: String,
    /// 结构的化学式
    pub formula: String,
    /// 结构位点数（核-壳拆分前）
    pub num_sites: usize,
    pub atom_types: Vec<AtomType>,
    pub bond_types: Vec<BondType>,
    pub atoms: Vec<LammpsAtom>,
    pub bonds: Vec<Bond>,
    /// [lx, ly, lz]
    pub cell_lengths: [f64; 3],
    /// [xy, xz, yz]
    pub tilt_factors: [f64; 3],
    /// 最后一个离子步的 DFT 应力 (kBar)
    pub expected_stress_tensor: Option<StressTensor>,
}

impl LammpsData {
    /// 期望应力，换算为 LAMMPS metal 单位 (bar)
    pub fn expected_stress_bar(&self) -> Option<StressTensor> {
        self.expected_stress_tensor.map(|s| s.to_bar())
    }

    /// 总电荷
    pub fn total_charge(&self) -> f64 {
        self.atoms.iter().map(|a| a.charge).sum()
    }
}

/// 写出 `atom_style full` 格式的 data 文件
pub fn to_lammps_data_string(data: &LammpsData) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "{} ({}) written by fitprep\n\n",
        data.file_name, data.formula
    ));

    result.push_str(&format!("{} atoms\n", data.atoms.len()));
    result.push_str(&format!("{} bonds\n", data.bonds.len()));
    result.push_str(&format!("{} atom types\n", data.atom_types.len()));
    result.push_str(&format!("{} bond types\n\n", data.bond_types.len()));

    let [lx, ly, lz] = data.cell_lengths;
    let [xy, xz, yz] = data.tilt_factors;
    result.push_str(&format!("0.0 {:.10} xlo xhi\n", lx));
    result.push_str(&format!("0.0 {:.10} ylo yhi\n", ly));
    result.push_str(&format!("0.0 {:.10} zlo zhi\n", lz));
    result.push_str(&format!("{:.10} {:.10} {:.10} xy xz yz\n\n", xy, xz, yz));

    result.push_str("Masses\n\n");
    for t in &data.atom_types {
        result.push_str(&format!("{} {:.6} # {}\n", t.id, t.mass, t.label()));
    }

    result.push_str("\nAtoms # full\n\n");
    for a in &data.atoms {
        result.push_str(&format!(
            "{} {} {} {:.6} {:16.10} {:16.10} {:16.10}\n",
            a.id, a.molecule, a.type_id, a.charge, a.position[0], a.position[1], a.position[2]
        ));
    }

    if !data.bonds.is_empty() {
        result.push_str("\nBonds\n\n");
        for b in &data.bonds {
            result.push_str(&format!(
                "{} {} {} {}\n",
                b.id, b.type_id, b.atoms[0], b.atoms[1]
            ));
        }
    }

    result
}
