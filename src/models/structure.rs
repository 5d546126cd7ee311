//! # 晶体结构数据模型
//!
//! 周期性晶胞表示：晶格 + 原子位点 + 逐位点属性（如 forces）。
//!
//! ## 功能
//! - 晶格参数与 LAMMPS 受限三斜盒子 (prism) 转换
//! - 逐位点属性挂载（数量必须与位点数一致）
//! - 对角超胞扩展，位点属性随镜像位点一起复制
//!
//! ## 依赖关系
//! - 被 `parsers/`, `collate/`, `lammps/` 使用
//! - 无外部模块依赖

use crate::error::{FitprepError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 挂载力的位点属性名
pub const FORCES: &str = "forces";

/// 晶格参数表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

/// LAMMPS 受限三斜盒子参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LammpsPrism {
    /// [lx, ly, lz]
    pub lengths: [f64; 3],
    /// [xy, xz, yz]
    pub tilts: [f64; 3],
}

impl LammpsPrism {
    /// 以行向量形式给出的 LAMMPS 坐标系晶格矩阵
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let [lx, ly, lz] = self.lengths;
        let [xy, xz, yz] = self.tilts;
        [[lx, 0.0, 0.0], [xy, ly, 0.0], [xz, yz, lz]]
    }
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let cos_gamma = gamma.to_radians().cos();
        let sin_gamma = gamma.to_radians().sin();

        let a_vec = [a, 0.0, 0.0];
        let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

        Lattice {
            matrix: [a_vec, b_vec, [c1, c2, c3]],
        }
    }

    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;

        let a = norm(a_vec);
        let b = norm(b_vec);
        let c = norm(c_vec);

        let alpha = (dot(b_vec, c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(a_vec, c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(a_vec, b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.matrix;

        // 行列式计算
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }

    /// 按整数因子缩放三个晶格向量
    pub fn scaled(&self, dims: [u32; 3]) -> Self {
        let mut matrix = self.matrix;
        for (row, &n) in matrix.iter_mut().zip(dims.iter()) {
            for x in row.iter_mut() {
                *x *= n as f64;
            }
        }
        Lattice { matrix }
    }

    /// 分数坐标转笛卡尔坐标
    pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = self.matrix;
        [
            frac[0] * m[0][0] + frac[1] * m[1][0] + frac[2] * m[2][0],
            frac[0] * m[0][1] + frac[1] * m[1][1] + frac[2] * m[2][1],
            frac[0] * m[0][2] + frac[1] * m[1][2] + frac[2] * m[2][2],
        ]
    }

    /// 转换为 LAMMPS 受限三斜盒子
    ///
    /// a 沿 x 轴，b 位于 xy 平面。
    pub fn lammps_prism(&self) -> LammpsPrism {
        let (a, b, c, alpha, beta, gamma) = self.parameters();

        let lx = a;
        let xy = b * gamma.to_radians().cos();
        let xz = c * beta.to_radians().cos();
        let ly = (b * b - xy * xy).sqrt();
        let yz = (b * c * alpha.to_radians().cos() - xy * xz) / ly;
        let lz = (c * c - xz * xz - yz * yz).sqrt();

        LammpsPrism {
            lengths: [lx, ly, lz],
            tilts: [xy, xz, yz],
        }
    }
}

fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u.iter().zip(v.iter()).map(|(x, y)| x * y).sum()
}

fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 分数坐标 [x, y, z]
    pub position: [f64; 3],

    /// 可选：原子标签（用于区分同种元素的不同位置）
    pub label: Option<String>,
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// 逐位点属性，每个位点一个值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SiteProperty {
    Vectors(Vec<[f64; 3]>),
    Scalars(Vec<f64>),
}

impl SiteProperty {
    pub fn len(&self) -> usize {
        match self {
            SiteProperty::Vectors(v) => v.len(),
            SiteProperty::Scalars(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按镜像顺序复制：整段重复 `images` 次
    fn tiled(&self, images: usize) -> SiteProperty {
        match self {
            SiteProperty::Vectors(v) => SiteProperty::Vectors(v.repeat(images)),
            SiteProperty::Scalars(v) => SiteProperty::Scalars(v.repeat(images)),
        }
    }
}

/// 晶体结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    /// 结构名称
    pub name: String,

    /// 晶格
    pub lattice: Lattice,

    /// 原子列表
    pub atoms: Vec<Atom>,

    /// 来源文件格式
    pub source_format: Option<String>,

    /// 逐位点属性
    pub site_properties: BTreeMap<String, SiteProperty>,
}

impl Crystal {
    pub fn new(name: impl Into<String>, lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Crystal {
            name: name.into(),
            lattice,
            atoms,
            source_format: None,
            site_properties: BTreeMap::new(),
        }
    }

    /// 位点数
    pub fn num_sites(&self) -> usize {
        self.atoms.len()
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// 挂载逐位点属性，值的数量必须等于位点数；同名属性会被覆盖
    pub fn add_site_property(&mut self, name: &str, values: SiteProperty) -> Result<()> {
        if values.len() != self.atoms.len() {
            return Err(FitprepError::SitePropertyMismatch {
                name: name.to_string(),
                expected: self.atoms.len(),
                found: values.len(),
            });
        }
        self.site_properties.insert(name.to_string(), values);
        Ok(())
    }

    /// 获取向量型位点属性
    pub fn site_vectors(&self, name: &str) -> Option<&[[f64; 3]]> {
        match self.site_properties.get(name) {
            Some(SiteProperty::Vectors(v)) => Some(v),
            _ => None,
        }
    }

    /// 对角超胞扩展 a×b×c
    ///
    /// 镜像按 (ia, ib, ic) 字典序枚举，每个镜像内保持原位点顺序；
    /// 所有位点属性随之复制到镜像位点。
    pub fn supercell(&self, dims: [u32; 3]) -> Result<Crystal> {
        if let Some(&bad) = dims.iter().find(|&&n| n == 0) {
            return Err(FitprepError::InvalidSupercellFactor {
                value: bad.to_string(),
            });
        }

        // 镜像数需放得进 u32，总位点数需放得进 usize
        let too_large = || FitprepError::InvalidSupercellFactor {
            value: format!("{}x{}x{}", dims[0], dims[1], dims[2]),
        };
        let n_images = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .ok_or_else(too_large)?;
        let n_sites = (n_images as usize)
            .checked_mul(self.atoms.len())
            .ok_or_else(too_large)?;

        let images = sc_indices(dims, n_images as usize);
        let scale = [dims[0] as f64, dims[1] as f64, dims[2] as f64];

        let mut atoms = Vec::with_capacity(n_sites);
        for image in &images {
            for atom in &self.atoms {
                let mut new_atom = atom.clone();
                for k in 0..3 {
                    new_atom.position[k] = (atom.position[k] + image[k] as f64) / scale[k];
                }
                atoms.push(new_atom);
            }
        }

        let site_properties = self
            .site_properties
            .iter()
            .map(|(name, prop)| (name.clone(), prop.tiled(images.len())))
            .collect();

        Ok(Crystal {
            name: self.name.clone(),
            lattice: self.lattice.scaled(dims),
            atoms,
            source_format: self.source_format.clone(),
            site_properties,
        })
    }
}

// 超胞镜像索引，ia 最外层
fn sc_indices(dims: [u32; 3], n_images: usize) -> Vec<[u32; 3]> {
    let mut out = Vec::with_capacity(n_images);
    for ia in 0..dims[0] {
        for ib in 0..dims[1] {
            for ic in 0..dims[2] {
                out.push([ia, ib, ic]);
            }
        }
    }
    out
}
