//! # ATAT 外部工具调用
//!
//! 在作业目录中依次运行 `str2ezvasp`、`ezvasp -n vasp.in`、`cleanvasp`。
//!
//! 默认失败即停止（非零退出码返回 `ExternalToolFailed`）；
//! `ToolPolicy::Ignore` 只给出警告并继续。
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 调用
//! - 使用 `utils/progress.rs`, `utils/output.rs`

use crate::error::{AtatError, Result};
use crate::utils::{output, progress};

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// 外部工具失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPolicy {
    /// 非零退出即报错
    FailFast,
    /// 警告后继续
    Ignore,
}

/// 外部工具的执行能力
pub trait Toolchain {
    /// 在 `dir` 中运行 `program args...`
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()>;
}

/// 通过 PATH 调用真实的 ATAT 工具
#[derive(Debug, Default)]
pub struct SystemTools;

impl Toolchain for SystemTools {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let display = command_line(program, args);
        log::debug!("Running '{}' in {}", display, dir.display());

        let spinner = progress::create_spinner(&display);
        let result = Command::new(program).args(args).current_dir(dir).output();
        spinner.finish_and_clear();

        let out = result.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AtatError::CommandNotFound {
                command: program.to_string(),
            },
            _ => AtatError::ExternalToolFailed {
                command: display.clone(),
                status: "spawn failed".to_string(),
                stderr: e.to_string(),
            },
        })?;

        let stdout = String::from_utf8_lossy(&out.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{} stdout:\n{}", program, stdout.trim_end());
        }

        if out.status.success() {
            Ok(())
        } else {
            Err(AtatError::ExternalToolFailed {
                command: display,
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim_end().to_string(),
            })
        }
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 按策略运行单个工具
pub fn run_step(
    tools: &dyn Toolchain,
    policy: ToolPolicy,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> Result<()> {
    match tools.run(dir, program, args) {
        Ok(()) => Ok(()),
        Err(e) if policy == ToolPolicy::Ignore => {
            log::warn!("Ignoring failure of '{}': {}", command_line(program, args), e);
            output::print_warning(&format!(
                "'{}' failed in {}, continuing",
                command_line(program, args),
                dir.display()
            ));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// 由 str.out 生成 vasp.in，再由 vasp.in 生成 VASP 输入文件
pub fn generate_inputs(tools: &dyn Toolchain, policy: ToolPolicy, dir: &Path) -> Result<()> {
    run_step(tools, policy, dir, "str2ezvasp", &[])?;
    run_step(tools, policy, dir, "ezvasp", &["-n", "vasp.in"])
}

/// 删除 VASP 输入文件，作业运行时由 runstruct_vasp 重新生成
pub fn clean_inputs(tools: &dyn Toolchain, policy: ToolPolicy, dir: &Path) -> Result<()> {
    run_step(tools, policy, dir, "cleanvasp", &[])
}

/// 按改写后的 vasp.wrap 重新生成 vasp.in
pub fn regenerate_input(tools: &dyn Toolchain, policy: ToolPolicy, dir: &Path) -> Result<()> {
    run_step(tools, policy, dir, "str2ezvasp", &[])
}
