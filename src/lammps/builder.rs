//! # LAMMPS 记录构建器
//!
//! 把挂载了力的结构与力场参数组合为 `LammpsData`：
//! - 原子类型按元素首次出现顺序编号，核-壳元素占用 core、shell 两个类型
//! - 核-壳位点拆成两个粒子，壳初始位于核的位置，并以一根键相连
//! - 坐标转换到 LAMMPS 受限三斜盒子坐标系
//!
//! ## 依赖关系
//! - 实现 `collate/builder.rs` 中的 `RecordBuilder`
//! - 使用 `models/`, `lammps/data.rs`

use super::data::{AtomType, Bond, BondType, LammpsAtom, LammpsData, ParticleKind};
use crate::collate::RecordBuilder;
use crate::error::{FitprepError, Result};
use crate::models::{Crystal, ForceFieldParams, Lattice, StressTensor, FORCES};
use std::collections::HashMap;

/// 默认的 LAMMPS 记录构建器
#[derive(Debug, Clone, Copy, Default)]
pub struct LammpsDataBuilder;

/// 一个元素对应的类型 id
struct ElementTypes {
    /// 刚性离子或核
    primary: usize,
    /// 壳类型与键类型
    shell: Option<(usize, usize)>,
}

impl RecordBuilder for LammpsDataBuilder {
    type Record = LammpsData;

    fn build(
        &self,
        structure: Crystal,
        params: &ForceFieldParams,
        index: usize,
        stresses: &[StressTensor],
    ) -> Result<LammpsData> {
        let mut atom_types: Vec<AtomType> = Vec::new();
        let mut bond_types: Vec<BondType> = Vec::new();
        let mut by_element: HashMap<String, ElementTypes> = HashMap::new();

        for atom in &structure.atoms {
            if by_element.contains_key(&atom.element) {
                continue;
            }
            let el = atom.element.as_str();
            let charge = params.charge(el)?;
            let mass = params.mass(el)?;

            let types = if params.is_core_shell(el) {
                let spring = params.spring(el)?.to_vec();
                let core_id = atom_types.len() + 1;
                atom_types.push(AtomType {
                    id: core_id,
                    element: el.to_string(),
                    kind: ParticleKind::Core,
                    mass: mass.core(),
                    charge: charge.core(),
                });
                atom_types.push(AtomType {
                    id: core_id + 1,
                    element: el.to_string(),
                    kind: ParticleKind::Shell,
                    mass: mass.shell(),
                    charge: charge.shell(),
                });
                let bond_id = bond_types.len() + 1;
                bond_types.push(BondType {
                    id: bond_id,
                    element: el.to_string(),
                    spring,
                });
                ElementTypes {
                    primary: core_id,
                    shell: Some((core_id + 1, bond_id)),
                }
            } else {
                let id = atom_types.len() + 1;
                atom_types.push(AtomType {
                    id,
                    element: el.to_string(),
                    kind: ParticleKind::Atom,
                    mass: mass.core(),
                    charge: charge.core(),
                });
                ElementTypes {
                    primary: id,
                    shell: None,
                }
            };
            by_element.insert(el.to_string(), types);
        }

        let prism = structure.lattice.lammps_prism();
        let frame = Lattice::from_vectors(prism.matrix());
        let forces = structure.site_vectors(FORCES);
        if let Some(f) = forces {
            if f.len() != structure.num_sites() {
                return Err(FitprepError::SitePropertyMismatch {
                    name: FORCES.to_string(),
                    expected: structure.num_sites(),
                    found: f.len(),
                });
            }
        }

        let mut atoms = Vec::new();
        let mut bonds = Vec::new();

        for (site, atom) in structure.atoms.iter().enumerate() {
            // 每个元素在上面的循环中都已登记
            let Some(types) = by_element.get(&atom.element) else {
                continue;
            };
            let position = frame.frac_to_cart(atom.position);
            let force = forces.and_then(|f| f.get(site)).copied().unwrap_or([0.0; 3]);

            let core_id = atoms.len() + 1;
            atoms.push(LammpsAtom {
                id: core_id,
                molecule: site + 1,
                type_id: types.primary,
                charge: atom_types[types.primary - 1].charge,
                position,
                force,
            });

            if let Some((shell_type, bond_type)) = types.shell {
                let shell_id = core_id + 1;
                atoms.push(LammpsAtom {
                    id: shell_id,
                    molecule: site + 1,
                    type_id: shell_type,
                    charge: atom_types[shell_type - 1].charge,
                    position,
                    force: [0.0; 3],
                });
                bonds.push(Bond {
                    id: bonds.len() + 1,
                    type_id: bond_type,
                    atoms: [core_id, shell_id],
                });
            }
        }

        Ok(LammpsData {
            file_name: format!("coords{}.lmp", index + 1),
            formula: structure.formula(),
            num_sites: structure.num_sites(),
            atom_types,
            bond_types,
            atoms,
            bonds,
            cell_lengths: prism.lengths,
            tilt_factors: prism.tilts,
            expected_stress_tensor: stresses.last().copied(),
        })
    }
}
