//! # 工具函数模块
//!
//! 提供美化输出、进度条、PBS 作业提交等工具。
//!
//! ## 依赖关系
//! - 被 `atat/`, `batch/`, `commands/` 使用
//! - 子模块: output, pbs, progress

pub mod output;
pub mod pbs;
pub mod progress;
