//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `atat/`, `parsers/`, `batch/`, `utils/`
//! - 子模块: submit, params, status

pub mod params;
pub mod status;
pub mod submit;

use crate::batch::{explicit_dirs, DirectoryCollector};
use crate::cli::submit::DiscoveryArgs;
use crate::cli::Commands;
use crate::error::Result;

use std::path::PathBuf;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Submit(args) => submit::execute(args),
        Commands::Params(args) => params::execute(args),
        Commands::Status(args) => status::execute(args),
    }
}

/// 确定待处理目录：`--discover` 搜索，否则使用显式列表
fn resolve_dirs(
    dirs: &[PathBuf],
    discovery: &DiscoveryArgs,
    required: &str,
) -> Result<Vec<PathBuf>> {
    match &discovery.discover {
        Some(root) => DirectoryCollector::new(root.clone())
            .requiring(required)
            .depth(discovery.depth)
            .include_errored(discovery.include_errored)
            .collect(),
        None => explicit_dirs(dirs),
    }
}
