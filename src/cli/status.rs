//! # status 子命令 CLI 定义
//!
//! 列出带 jobid 标记（已提交、尚未结束）的作业目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/status.rs`

use super::submit::DiscoveryArgs;
use clap::Args;
use std::path::PathBuf;

/// status 子命令参数
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Job directories (default: current directory)
    pub dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Also save the table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
