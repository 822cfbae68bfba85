//! # params 子命令 CLI 定义
//!
//! 对已有 POSCAR/POTCAR 只做参数推导，不运行外部工具、不写文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/params.rs`

use clap::Args;
use std::path::PathBuf;

/// params 子命令参数
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Directory holding POSCAR and POTCAR
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// POSCAR path (default: <DIR>/POSCAR)
    #[arg(long)]
    pub poscar: Option<PathBuf>,

    /// POTCAR path (default: <DIR>/POTCAR)
    #[arg(long)]
    pub potcar: Option<PathBuf>,
}
