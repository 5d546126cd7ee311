//! # collate 命令实现
//!
//! 收集 POSCAR/OUTCAR 并写出 LAMMPS data 文件。
//!
//! ## 功能
//! - 读取 JSON 力场参数与 supercell 规格
//! - 按文件顺序收集所有结构（单线程，任一失败即中止）
//! - 并行写出每个结构的 data 文件
//! - 终端表格与 CSV 汇总
//!
//! ## 依赖关系
//! - 使用 `cli/collate.rs` 定义的参数
//! - 使用 `collate/`, `lammps/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::collate::CollateArgs;
use crate::collate::{CollateConfig, Collator, SupercellSpec};
use crate::error::{FitprepError, Result};
use crate::lammps::{to_lammps_data_string, LammpsData, LammpsDataBuilder};
use crate::models::ForceFieldParams;
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Structure")]
    structure: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Sites")]
    sites: usize,
    #[tabled(rename = "Particles")]
    particles: usize,
    #[tabled(rename = "σ xx/yy/zz (kB)")]
    stress: String,
    #[tabled(rename = "Data file")]
    data_file: String,
}

/// 执行 collate 命令
pub fn execute(args: CollateArgs) -> Result<()> {
    output::print_header("Collating Structural Data");

    let params = ForceFieldParams::from_json_file(&args.params)?;
    let supercell = match args.supercell.as_deref() {
        Some(text) => SupercellSpec::parse_str(text)?,
        None => None,
    };

    let config = CollateConfig::new(&args.poscars, &args.outcars)
        .with_pattern(args.pattern.as_str())
        .with_outcar_prefix(args.outcar_prefix.as_str());
    let collator = Collator::new(config);

    let files = collator.discover()?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.poscars.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} structures", files.len()));
    match &supercell {
        Some(SupercellSpec::Uniform(d)) => output::print_info(&format!(
            "Expanding every structure to a {}x{}x{} supercell",
            d[0], d[1], d[2]
        )),
        Some(SupercellSpec::PerStructure(_)) => {
            output::print_info("Expanding each structure with its own supercell")
        }
        None => {}
    }

    let pb = progress::create_progress_bar(files.len() as u64, "Collating");
    let collated = collator.collate_files(
        &files,
        &params,
        supercell.as_ref(),
        &LammpsDataBuilder,
        |_, _| pb.inc(1),
    );
    pb.finish_and_clear();
    let records = collated?;

    fs::create_dir_all(&args.output).map_err(|e| FitprepError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    // 设置并行度
    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let written: Vec<PathBuf> = records
        .par_iter()
        .map(|record| write_record(record, &args.output))
        .collect::<Result<_>>()?;

    let rows: Vec<SummaryRow> = records
        .iter()
        .zip(files.iter())
        .enumerate()
        .map(|(i, (record, path))| SummaryRow {
            index: i + 1,
            structure: file_label(path),
            formula: record.formula.clone(),
            sites: record.num_sites,
            particles: record.atoms.len(),
            stress: record
                .expected_stress_tensor
                .map(|s| {
                    let c = s.components;
                    format!("{:.2} / {:.2} / {:.2}", c[0][0], c[1][1], c[2][2])
                })
                .unwrap_or_else(|| "-".to_string()),
            data_file: record.file_name.clone(),
        })
        .collect();

    println!("{}", Table::new(&rows));

    save_summary_csv(&records, &files, &args.summary)?;
    output::print_success(&format!("Summary saved to '{}'", args.summary.display()));

    output::print_done(&format!(
        "Wrote {} LAMMPS data file(s) to '{}'",
        written.len(),
        args.output.display()
    ));

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 写出单个 data 文件
fn write_record(record: &LammpsData, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(&record.file_name);
    fs::write(&path, to_lammps_data_string(record)).map_err(|e| FitprepError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path)
}

/// 保存汇总 CSV
fn save_summary_csv(records: &[LammpsData], files: &[PathBuf], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "index",
        "structure",
        "formula",
        "sites",
        "particles",
        "data_file",
        "stress_xx_kB",
        "stress_yy_kB",
        "stress_zz_kB",
        "stress_xy_kB",
        "stress_xz_kB",
        "stress_yz_kB",
    ])?;

    for (i, (record, path)) in records.iter().zip(files.iter()).enumerate() {
        let mut row = vec![
            i.to_string(),
            file_label(path),
            record.formula.clone(),
            record.num_sites.to_string(),
            record.atoms.len().to_string(),
            record.file_name.clone(),
        ];
        match record.expected_stress_tensor {
            Some(s) => row.extend(s.lammps_order().iter().map(|v| format!("{:.6}", v))),
            None => row.extend(std::iter::repeat(String::new()).take(6)),
        }
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(|e| FitprepError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PARAMS: &str = r#"{
        "core_shell": { "Li": false, "O": true },
        "charges": { "Li": 1.0, "O": { "core": 0.96, "shell": -2.96 } },
        "masses": { "Li": 6.941, "O": { "core": 14.3991, "shell": 1.5999 } },
        "cs_springs": { "O-O": [65.0, 0.0] }
    }"#;

    const POSCAR: &str = "Li2O\n1.0\n4.6 0.0 0.0\n0.0 4.6 0.0\n0.0 0.0 4.6\nLi O\n2 1\nDirect\n0.25 0.25 0.25\n0.75 0.75 0.75\n0.0 0.0 0.0\n";

    const OUTCAR: &str = "\
 POSITION                                       TOTAL-FORCE (eV/Angst)
 -----------------------------------------------------------------------------------
      1.15000      1.15000      1.15000         0.010000      0.000000      0.000000
      3.45000      3.45000      3.45000        -0.010000      0.000000      0.000000
      0.00000      0.00000      0.00000         0.000000      0.000000      0.000000
 -----------------------------------------------------------------------------------
  in kB      -5.00000    -5.00000    -5.00000     0.00000     0.00000     0.00000
";

    fn args(temp: &TempDir, supercell: Option<&str>) -> CollateArgs {
        let root = temp.path();
        fs::create_dir_all(root.join("poscars")).unwrap();
        fs::create_dir_all(root.join("outcars")).unwrap();
        for i in 1..=2 {
            fs::write(root.join(format!("poscars/POSCAR{i}")), POSCAR).unwrap();
            fs::write(root.join(format!("outcars/OUTCAR{i}")), OUTCAR).unwrap();
        }
        fs::write(root.join("params.json"), PARAMS).unwrap();

        CollateArgs {
            params: root.join("params.json"),
            poscars: root.join("poscars"),
            outcars: root.join("outcars"),
            pattern: "POSCAR*".to_string(),
            outcar_prefix: "OUTCAR".to_string(),
            supercell: supercell.map(str::to_string),
            output: root.join("lammps"),
            summary: root.join("collated.csv"),
            jobs: 1,
        }
    }

    #[test]
    fn test_execute_writes_data_files_and_summary() {
        let temp = TempDir::new().expect("tempdir should be created");
        execute(args(&temp, Some("[2,1,1]"))).unwrap();

        let data = fs::read_to_string(temp.path().join("lammps/coords2.lmp")).unwrap();
        // 3 位点 × 2 镜像，O 拆成核-壳：6 + 2 = 8 个粒子
        assert!(data.contains("8 atoms\n"));
        assert!(data.contains("2 bonds\n"));

        let summary = fs::read_to_string(temp.path().join("collated.csv")).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,POSCAR1,Li4O2,6,8,coords1.lmp,-5.000000"));
    }

    #[test]
    fn test_execute_rejects_bad_supercell() {
        let temp = TempDir::new().expect("tempdir should be created");
        let err = execute(args(&temp, Some("[[1,1,1],[2,2]]"))).unwrap_err();
        assert!(matches!(err, FitprepError::SupercellDimensions));
        assert!(!temp.path().join("lammps").exists());
    }
}
