//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `submit`: 准备 vasp.wrap 并提交 ATAT/VASP 作业
//! - `params`: 只计算 NBANDS / MAGMOM
//! - `status`: 列出带 jobid 标记的目录
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: submit, params, status

pub mod params;
pub mod status;
pub mod submit;

use clap::{ArgAction, Parser, Subcommand};

/// atat-submit - ATAT/VASP 作业提交工具
#[derive(Parser)]
#[command(name = "atat-submit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Prepare vasp.wrap and submit ATAT/VASP structure calculations to PBS", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Derive NBANDS/MAGMOM, rewrite vasp.wrap and submit with qsub
    Submit(submit::SubmitArgs),

    /// Print the derived NBANDS/MAGMOM for an existing POSCAR/POTCAR
    Params(params::ParamsArgs),

    /// List directories with a pending jobid marker
    Status(status::StatusArgs),
}
