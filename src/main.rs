//! # atat-submit - ATAT/VASP 作业提交工具
//!
//! 在 ATAT 结构目录中准备 `vasp.wrap`（NBANDS、MAGMOM）并通过 `qsub` 提交
//! `runstruct_vasp` 作业。
//!
//! ## 子命令
//! - `submit` - 准备并提交作业（可批量）
//! - `params` - 只计算 NBANDS / MAGMOM
//! - `status` - 列出带 jobid 标记的目录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── atat/      (作业准备核心)
//!   │     ├── batch/     (目录收集与顺序执行)
//!   │     ├── parsers/   (POSCAR/POTCAR 解析)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出、进度条、PBS)
//!   └── error.rs    (错误处理)
//! ```

mod atat;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;
use log::LevelFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
