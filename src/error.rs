//! # 统一错误处理模块
//!
//! 定义 atat-submit 的所有错误类型，使用 `thiserror` 派生。
//!
//! 注意：`jobid` 已存在不属于错误，由 `atat::submit::SubmitOutcome` 表示。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::path::PathBuf;
use thiserror::Error;

/// atat-submit 统一错误类型
#[derive(Error, Debug)]
pub enum AtatError {
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

    // ─────────────────────────────────────────────────────────────
    // 作业准备错误
    // ─────────────────────────────────────────────────────────────
    #[error("No vasp.wrap found in {}", format_searched(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("No default valence electron count for element '{symbol}' (check POTCAR)")]
    MissingElementData { symbol: String },

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
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External tool failed: {command} ({status})\n{stderr}")]
    ExternalToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Job submission failed in {dir}: {reason}")]
    SubmissionFailed { dir: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AtatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_lists_paths() {
        let err = AtatError::ConfigNotFound {
            searched: vec![
                PathBuf::from("job/vasp.wrap"),
                PathBuf::from("job/../vasp.wrap"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("job/vasp.wrap, job/../vasp.wrap"));
    }

    #[test]
    fn test_missing_element_names_symbol() {
        let err = AtatError::MissingElementData {
            symbol: "Co".to_string(),
        };
        assert!(err.to_string().contains("'Co'"));
    }
}
