//! # 结构收集器
//!
//! 逐个处理排序后的结构文件：
//! 读取 POSCAR → 读取对应 OUTCAR 的力与应力 → 挂载最后一步的力
//! → 可选超胞扩展 → 交给 `RecordBuilder` 生成记录。
//!
//! 处理严格按文件顺序单线程进行，任一结构失败即中止整个调用，不返回部分结果。
//!
//! ## 依赖关系
//! - 被 `commands/collate.rs` 使用
//! - 使用 `parsers/`, `models/`, `collate/supercell.rs`, `collate/builder.rs`
//! - 使用 `walkdir` 与 `glob` 枚举结构文件

use super::builder::RecordBuilder;
use super::config::CollateConfig;
use super::supercell::SupercellSpec;
use crate::error::{FitprepError, Result};
use crate::models::{Crystal, ForceFieldParams, SiteProperty, StressTensor, FORCES};
use crate::parsers::{outcar, poscar};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 结构收集器
pub struct Collator {
    config: CollateConfig,
}

impl Collator {
    pub fn new(config: CollateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollateConfig {
        &self.config
    }

    /// 枚举结构文件，按文件名字典序排序；符号链接按其目标判断
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.poscar_dir;
        if !dir.is_dir() {
            return Err(FitprepError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let pattern = glob::Pattern::new(&self.config.structure_pattern).map_err(|e| {
            FitprepError::InvalidArgument(format!(
                "Invalid pattern '{}': {}",
                self.config.structure_pattern, e
            ))
        })?;

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.file_name().to_str().map_or(false, |n| pattern.matches(n)))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 读取第 `index` 个结构并挂载力，返回结构与该计算的应力
    pub fn load_structure(
        &self,
        poscar_path: &Path,
        index: usize,
    ) -> Result<(Crystal, Vec<StressTensor>)> {
        let mut crystal = poscar::parse_poscar_file(poscar_path)?;

        let outcar_path = self.config.outcar_path(index);
        let data = outcar::parse_outcar_file(&outcar_path)?;

        let forces = data
            .final_forces()
            .ok_or_else(|| FitprepError::ParseError {
                format: "outcar".to_string(),
                path: outcar_path.display().to_string(),
                reason: "No TOTAL-FORCE block found".to_string(),
            })?
            .clone();

        crystal.add_site_property(FORCES, SiteProperty::Vectors(forces))?;

        Ok((crystal, data.stresses))
    }

    /// 收集所有结构，输出顺序与排序后的结构文件一致
    pub fn collate<B: RecordBuilder>(
        &self,
        params: &ForceFieldParams,
        supercell: Option<&SupercellSpec>,
        builder: &B,
    ) -> Result<Vec<B::Record>> {
        self.collate_with(params, supercell, builder, |_, _| {})
    }

    /// 同 `collate`，每处理完一个结构调用一次 `on_structure(index, path)`
    pub fn collate_with<B, F>(
        &self,
        params: &ForceFieldParams,
        supercell: Option<&SupercellSpec>,
        builder: &B,
        on_structure: F,
    ) -> Result<Vec<B::Record>>
    where
        B: RecordBuilder,
        F: FnMut(usize, &Path),
    {
        let files = self.discover()?;
        self.collate_files(&files, params, supercell, builder, on_structure)
    }

    /// 收集已枚举好的结构文件，`files[i]` 与第 i+1 个 OUTCAR 配对
    pub fn collate_files<B, F>(
        &self,
        files: &[PathBuf],
        params: &ForceFieldParams,
        supercell: Option<&SupercellSpec>,
        builder: &B,
        mut on_structure: F,
    ) -> Result<Vec<B::Record>>
    where
        B: RecordBuilder,
        F: FnMut(usize, &Path),
    {
        if let Some(spec) = supercell {
            spec.validate_count(files.len())?;
        }

        let mut records = Vec::with_capacity(files.len());

        for (i, path) in files.iter().enumerate() {
            let (mut crystal, stresses) = self.load_structure(path, i)?;

            if let Some(dims) = supercell.and_then(|spec| spec.dims_for(i)) {
                crystal = crystal.supercell(dims)?;
            }

            records.push(builder.build(crystal, params, i, &stresses)?);
            on_structure(i, path);
        }

        Ok(records)
    }
}

/// 使用给定配置收集所有结构
pub fn collate<B: RecordBuilder>(
    config: &CollateConfig,
    params: &ForceFieldParams,
    supercell: Option<&SupercellSpec>,
    builder: &B,
) -> Result<Vec<B::Record>> {
    Collator::new(config.clone()).collate(params, supercell, builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// 测试用构建器：原样返回结构、序号和应力数
    struct Echo;

    impl RecordBuilder for Echo {
        type Record = (Crystal, usize, usize);

        fn build(
            &self,
            structure: Crystal,
            _params: &ForceFieldParams,
            index: usize,
            stresses: &[StressTensor],
        ) -> Result<Self::Record> {
            Ok((structure, index, stresses.len()))
        }
    }

    fn poscar(name: &str, n_li: usize) -> String {
        let mut s = format!(
            "{name}\n1.0\n4.0 0.0 0.0\n0.0 4.0 0.0\n0.0 0.0 4.0\nLi O\n{n_li} 2\nDirect\n"
        );
        for i in 0..n_li + 2 {
            s.push_str(&format!("{:.3} 0.0 0.0\n", i as f64 * 0.2));
        }
        s
    }

    fn force_block(forces: &[[f64; 3]]) -> String {
        let mut s = String::from(
            " POSITION                                       TOTAL-FORCE (eV/Angst)\n",
        );
        s.push_str(" ---------------------------------------------------------------\n");
        for f in forces {
            s.push_str(&format!(
                "      0.00000      0.00000      0.00000   {:12.6} {:12.6} {:12.6}\n",
                f[0], f[1], f[2]
            ));
        }
        s.push_str(" ---------------------------------------------------------------\n");
        s
    }

    fn forces(n: usize, offset: f64) -> Vec<[f64; 3]> {
        (0..n)
            .map(|i| [offset + i as f64, -(i as f64) * 0.5, 0.25])
            .collect()
    }

    fn outcar(n: usize, offset: f64) -> String {
        let mut s = force_block(&forces(n, 0.0));
        s.push_str("  in kB      -1.00000    -2.00000    -3.00000     0.00000     0.00000     0.00000\n");
        s.push_str(&force_block(&forces(n, offset)));
        s.push_str("  in kB      -4.00000    -5.00000    -6.00000     0.00000     0.00000     0.00000\n");
        s
    }

    /// 建立 poscars/ 与 outcars/，`sizes[i]` 为第 i 个结构的 Li 数
    fn stage(sizes: &[usize]) -> TempDir {
        let temp = TempDir::new().expect("tempdir should be created");
        let poscars = temp.path().join("poscars");
        let outcars = temp.path().join("outcars");
        fs::create_dir_all(&poscars).unwrap();
        fs::create_dir_all(&outcars).unwrap();

        for (i, &n_li) in sizes.iter().enumerate() {
            let n = n_li + 2;
            fs::write(
                poscars.join(format!("POSCAR{}", i + 1)),
                poscar(&format!("s{}", i + 1), n_li),
            )
            .unwrap();
            fs::write(
                outcars.join(format!("OUTCAR{}", i + 1)),
                outcar(n, 10.0 * (i + 1) as f64),
            )
            .unwrap();
        }
        temp
    }

    fn collator(temp: &TempDir) -> Collator {
        Collator::new(CollateConfig::in_root(temp.path()))
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let temp = stage(&[2, 2]);
        let poscars = temp.path().join("poscars");
        fs::write(poscars.join("README"), "not a structure").unwrap();
        fs::write(poscars.join("POSCAR0"), poscar("s0", 2)).unwrap();

        let files = collator(&temp).discover().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["POSCAR0", "POSCAR1", "POSCAR2"]);
    }

    #[test]
    fn test_discover_is_lexicographic() {
        let temp = stage(&[2, 2]);
        fs::write(temp.path().join("poscars/POSCAR10"), poscar("s10", 2)).unwrap();

        let files = collator(&temp).discover().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["POSCAR1", "POSCAR10", "POSCAR2"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinks() {
        let temp = stage(&[2, 2]);
        let poscars = temp.path().join("poscars");
        let target = temp.path().join("s1.vasp");
        fs::rename(poscars.join("POSCAR1"), &target).unwrap();
        std::os::unix::fs::symlink(&target, poscars.join("POSCAR1")).unwrap();

        let files = collator(&temp).discover().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("POSCAR1"));

        let records = collator(&temp)
            .collate(&ForceFieldParams::default(), None, &Echo)
            .unwrap();
        assert_eq!(records[0].0.name, "s1");
        assert_eq!(
            records[1].0.site_vectors(FORCES).unwrap(),
            forces(4, 20.0).as_slice()
        );
    }

    #[test]
    fn test_collate_files_uses_given_list() {
        let temp = stage(&[2, 1]);
        let c = collator(&temp);
        let files = c.discover().unwrap();
        fs::write(temp.path().join("poscars/POSCAR0"), poscar("s0", 2)).unwrap();

        let records = c
            .collate_files(&files, &ForceFieldParams::default(), None, &Echo, |_, _| {})
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0.name, "s1");
        assert_eq!(records[1].0.num_sites(), 3);
    }

    #[test]
    fn test_missing_poscar_dir() {
        let temp = TempDir::new().unwrap();
        let err = collator(&temp).discover().unwrap_err();
        assert!(matches!(err, FitprepError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_order_and_final_forces() {
        let temp = stage(&[2, 1, 3]);
        let records = collator(&temp)
            .collate(&ForceFieldParams::default(), None, &Echo)
            .unwrap();

        assert_eq!(records.len(), 3);
        for (i, (crystal, index, n_stress)) in records.iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(crystal.name, format!("s{}", i + 1));
            assert_eq!(*n_stress, 2);

            let n = crystal.num_sites();
            let expected = forces(n, 10.0 * (i + 1) as f64);
            assert_eq!(crystal.site_vectors(FORCES).unwrap(), expected.as_slice());
        }
        assert_eq!(records[0].0.num_sites(), 4);
        assert_eq!(records[1].0.num_sites(), 3);
        assert_eq!(records[2].0.num_sites(), 5);
    }

    #[test]
    fn test_uniform_supercell_scenario() {
        let temp = stage(&[2, 2]);
        let spec = SupercellSpec::Uniform([2, 1, 1]);
        let records = collator(&temp)
            .collate(&ForceFieldParams::default(), Some(&spec), &Echo)
            .unwrap();

        assert_eq!(records.len(), 2);
        for (i, (crystal, _, _)) in records.iter().enumerate() {
            assert_eq!(crystal.num_sites(), 8);
            let last = forces(4, 10.0 * (i + 1) as f64);
            let f = crystal.site_vectors(FORCES).unwrap();
            assert_eq!(&f[..4], last.as_slice());
            assert_eq!(&f[4..], &f[..4]);
        }
    }

    #[test]
    fn test_per_structure_supercell() {
        let temp = stage(&[2, 2]);
        let spec = SupercellSpec::PerStructure(vec![[1, 1, 1], [2, 2, 1]]);
        let records = collator(&temp)
            .collate(&ForceFieldParams::default(), Some(&spec), &Echo)
            .unwrap();

        assert_eq!(records[0].0.num_sites(), 4);
        assert_eq!(records[1].0.num_sites(), 16);
    }

    #[test]
    fn test_per_structure_count_mismatch() {
        let temp = stage(&[2, 2]);
        let spec = SupercellSpec::PerStructure(vec![[1, 1, 1]]);
        let err = collator(&temp)
            .collate(&ForceFieldParams::default(), Some(&spec), &Echo)
            .unwrap_err();
        assert!(matches!(
            err,
            FitprepError::SupercellCount {
                expansions: 1,
                structures: 2
            }
        ));
    }

    #[test]
    fn test_force_count_mismatch_aborts() {
        let temp = stage(&[2, 2]);
        fs::write(temp.path().join("outcars/OUTCAR2"), outcar(3, 1.0)).unwrap();

        let mut seen = Vec::new();
        let err = collator(&temp)
            .collate_with(&ForceFieldParams::default(), None, &Echo, |i, _| seen.push(i))
            .unwrap_err();

        assert!(matches!(
            err,
            FitprepError::SitePropertyMismatch {
                expected: 4,
                found: 3,
                ..
            }
        ));
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn test_missing_outcar_aborts() {
        let temp = stage(&[2, 2]);
        fs::remove_file(temp.path().join("outcars/OUTCAR2")).unwrap();
        let err = collator(&temp)
            .collate(&ForceFieldParams::default(), None, &Echo)
            .unwrap_err();
        match err {
            FitprepError::FileNotFound { path } => assert!(path.ends_with("OUTCAR2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_outcar_without_forces() {
        let temp = stage(&[2]);
        fs::write(temp.path().join("outcars/OUTCAR1"), "no forces\n").unwrap();
        let err = collator(&temp)
            .collate(&ForceFieldParams::default(), None, &Echo)
            .unwrap_err();
        assert!(err.to_string().contains("No TOTAL-FORCE block found"));
    }

    #[test]
    fn test_closure_builder() {
        let temp = stage(&[1, 2]);
        let config = CollateConfig::in_root(temp.path());
        let counts = collate(
            &config,
            &ForceFieldParams::default(),
            None,
            &|c: Crystal, _: &ForceFieldParams, i: usize, _: &[StressTensor]| -> Result<(usize, usize)> {
                Ok((i, c.num_sites()))
            },
        )
        .unwrap();
        assert_eq!(counts, vec![(0, 3), (1, 4)]);
    }

    #[test]
    fn test_empty_directory() {
        let temp = stage(&[]);
        let records = collator(&temp)
            .collate(&ForceFieldParams::default(), Some(&SupercellSpec::Uniform([2, 2, 2])), &Echo)
            .unwrap();
        assert!(records.is_empty());
    }
}
