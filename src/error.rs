//! # 统一错误处理模块
//!
//! 定义 fitprep 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// fitprep 统一错误类型
#[derive(Error, Debug)]
pub enum FitprepError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // supercell 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Incorrect type for supercell: supercell must be a list of 3 integers, or a list of such \
         lists, one per structure. Example: [1,1,1] or [[1,1,1],[2,2,2]]"
    )]
    SupercellType,

    #[error(
        "Incorrect dimensions for supercell: requires x,y,z expansion or a per-structure list of \
         x,y,z expansions."
    )]
    SupercellDimensions,

    #[error(
        "Supercell list has {expansions} x,y,z expansions but {structures} structures were found; \
         a per-structure supercell needs exactly one expansion per structure"
    )]
    SupercellCount { expansions: usize, structures: usize },

    #[error("Invalid supercell factor {value}: expansion factors must be integers >= 1")]
    InvalidSupercellFactor { value: String },

    // ─────────────────────────────────────────────────────────────
    // 数据形状错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Site property '{name}' has {found} values but the structure has {expected} sites"
    )]
    SitePropertyMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 力场参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Missing {kind} parameter for '{label}'")]
    MissingParameter { kind: String, label: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / JSON 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, FitprepError>;
