//! # submit 子命令 CLI 定义
//!
//! 在一个或多个 ATAT 结构目录中准备 vasp.wrap 并提交到 PBS
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/status.rs` 使用
//! - 参数传递给 `commands/submit.rs`

use crate::utils::pbs::DEFAULT_WALLTIME;

use clap::Args;
use std::path::PathBuf;

/// 作业目录搜索参数（对应 `foreachfile -e -d N`）
#[derive(Args, Debug, Clone)]
pub struct DiscoveryArgs {
    /// Search this directory for job directories instead of listing them
    #[arg(long, conflicts_with = "dirs")]
    pub discover: Option<PathBuf>,

    /// Maximum depth searched below --discover
    #[arg(long, default_value_t = 1, requires = "discover")]
    pub depth: usize,

    /// Also process directories containing an 'error' file
    #[arg(long, default_value_t = false)]
    pub include_errored: bool,
}

/// submit 子命令参数
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Job directories (default: current directory)
    pub dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    // ─────────────────────────────────────────────────────────────
    // PBS options
    // ─────────────────────────────────────────────────────────────
    /// Walltime limit requested from PBS
    #[arg(long, env = "ATAT_SUBMIT_WALLTIME", default_value = DEFAULT_WALLTIME)]
    pub walltime: String,

    /// Submission command
    #[arg(long, env = "ATAT_SUBMIT_QSUB", default_value = "qsub")]
    pub qsub: String,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Warn and continue when str2ezvasp/ezvasp/cleanvasp exit non-zero
    #[arg(long, default_value_t = false)]
    pub ignore_tool_errors: bool,

    /// Prepare vasp.wrap but do not call qsub
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Continue with the next directory after a failure
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}
