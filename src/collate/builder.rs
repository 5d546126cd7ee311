//! # 记录构建接口
//!
//! 收集器把扩展后的结构交给 `RecordBuilder` 生成一条输出记录。
//! `lammps::LammpsDataBuilder` 是默认实现；任意同签名闭包也可直接使用。
//!
//! ## 依赖关系
//! - 被 `collate/collator.rs` 使用
//! - 由 `lammps/builder.rs` 实现

use crate::error::Result;
use crate::models::{Crystal, ForceFieldParams, StressTensor};

/// 由单个结构构建一条输出记录
pub trait RecordBuilder {
    type Record;

    /// `index` 为结构在排序后文件列表中的位置（0 起始），
    /// `stresses` 为对应 OUTCAR 中全部离子步的应力
    fn build(
        &self,
        structure: Crystal,
        params: &ForceFieldParams,
        index: usize,
        stresses: &[StressTensor],
    ) -> Result<Self::Record>;
}

impl<F, R> RecordBuilder for F
where
    F: Fn(Crystal, &ForceFieldParams, usize, &[StressTensor]) -> Result<R>,
{
    type Record = R;

    fn build(
        &self,
        structure: Crystal,
        params: &ForceFieldParams,
        index: usize,
        stresses: &[StressTensor],
    ) -> Result<R> {
        self(structure, params, index, stresses)
    }
}
