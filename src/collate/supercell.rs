//! # 超胞扩展规格
//!
//! 把用户给出的 supercell（JSON 值）一次性校验为带标签的枚举：
//! - `[a, b, c]` → `Uniform`，所有结构使用同一扩展
//! - `[[a, b, c], ...]` → `PerStructure`，第 i 个结构使用第 i 个扩展
//!
//! 判定顺序：非数组 → 类型错误；首元素为整数且长度为 3 → Uniform；
//! 每个元素都是长度为 3 的数组 → PerStructure；其余 → 维度错误。
//! 扩展因子必须是 >= 1 的整数。
//!
//! ## 依赖关系
//! - 被 `collate/collator.rs`, `commands/collate.rs` 使用

use crate::error::{FitprepError, Result};
use serde_json::Value;

/// 超胞扩展规格
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupercellSpec {
    /// 所有结构使用同一个 x,y,z 扩展
    Uniform([u32; 3]),
    /// 每个结构一个 x,y,z 扩展，与排序后的结构文件一一对应
    PerStructure(Vec<[u32; 3]>),
}

impl From<[u32; 3]> for SupercellSpec {
    fn from(dims: [u32; 3]) -> Self {
        SupercellSpec::Uniform(dims)
    }
}

impl From<Vec<[u32; 3]>> for SupercellSpec {
    fn from(dims: Vec<[u32; 3]>) -> Self {
        SupercellSpec::PerStructure(dims)
    }
}

impl SupercellSpec {
    /// 从 JSON 值解析；`null` 表示不扩展
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        let items = match value {
            Value::Null => return Ok(None),
            Value::Array(items) => items,
            _ => return Err(FitprepError::SupercellType),
        };

        let first_is_integer = items.first().map_or(false, is_integer);
        if first_is_integer && items.len() == 3 {
            return Ok(Some(SupercellSpec::Uniform(parse_triple(items)?)));
        }

        let all_triples = !items.is_empty()
            && items
                .iter()
                .all(|item| matches!(item, Value::Array(inner) if inner.len() == 3));
        if all_triples {
            let dims = items
                .iter()
                .filter_map(Value::as_array)
                .map(|inner| parse_triple(inner))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Some(SupercellSpec::PerStructure(dims)));
        }

        Err(FitprepError::SupercellDimensions)
    }

    /// 从命令行文本解析，文本按 JSON 读取；非 JSON 文本视为字符串值
    pub fn parse_str(text: &str) -> Result<Option<Self>> {
        let value = serde_json::from_str(text.trim())
            .unwrap_or_else(|_| Value::String(text.to_string()));
        Self::from_value(&value)
    }

    /// 检查逐结构扩展的数量与结构数一致
    pub fn validate_count(&self, structures: usize) -> Result<()> {
        match self {
            SupercellSpec::Uniform(_) => Ok(()),
            SupercellSpec::PerStructure(dims) if dims.len() == structures => Ok(()),
            SupercellSpec::PerStructure(dims) => Err(FitprepError::SupercellCount {
                expansions: dims.len(),
                structures,
            }),
        }
    }

    /// 第 `index` 个结构的扩展；调用前需通过 `validate_count`
    pub fn dims_for(&self, index: usize) -> Option<[u32; 3]> {
        match self {
            SupercellSpec::Uniform(dims) => Some(*dims),
            SupercellSpec::PerStructure(dims) => dims.get(index).copied(),
        }
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn parse_triple(items: &[Value]) -> Result<[u32; 3]> {
    let mut dims = [0u32; 3];
    for (slot, item) in dims.iter_mut().zip(items) {
        *slot = item
            .as_u64()
            .filter(|&n| n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| FitprepError::InvalidSupercellFactor {
                value: item.to_string(),
            })?;
    }
    Ok(dims)
}
