//! # 批量处理模块
//!
//! 对应 `foreachfile -e -d N` 的工作方式：收集作业目录并逐个处理。
//!
//! ## 功能
//! - 显式目录或递归搜索
//! - 顺序执行
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `walkdir` 搜索目录
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{explicit_dirs, DirectoryCollector};
pub use runner::{BatchRunner, ProcessResult};
