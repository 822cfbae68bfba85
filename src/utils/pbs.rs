//! # PBS 作业提交工具
//!
//! 生成作业描述并通过 `qsub` 提交（脚本从标准输入传入）。
//!
//! ## 依赖关系
//! - 被 `atat/submit.rs` 使用
//! - 无外部模块依赖

use crate::error::{AtatError, Result};

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 默认墙钟时间限制
pub const DEFAULT_WALLTIME: &str = "168:00:00";

/// 作业脚本：开始前清理上次残留，结束后删除 jobid 标记
pub const RUNSTRUCT_SCRIPT: &str = r#"#!/bin/bash
cd $PBS_O_WORKDIR
rm -f error           # remove these if they are hanging around
rm -f energy
rm -f wait            # we are about to start, so remove wait
runstruct_vasp -p
rm -f jobid           # after job is over, remove jobid file
# end
"#;

/// 调度器返回的作业号，视为不透明字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
    /// 从 qsub 的标准输出解析；空输出视为失败
    pub fn parse(stdout: &str) -> Option<Self> {
        let id = stdout.trim();
        if id.is_empty() {
            None
        } else {
            Some(JobId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// org-mode 链接形式的状态查询引用
    pub fn status_reference(&self) -> String {
        format!("|[[shell:qstat -f {id}][{id}]]|", id = self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// PBS 作业描述
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    /// 作业名（ATAT 习惯使用作业目录的绝对路径）
    pub name: String,
    /// 提交目录
    pub workdir: PathBuf,
    pub walltime: String,
    /// 合并标准输出与标准错误 (`-j oe`)
    pub join_output: bool,
    pub script: String,
}

impl JobDescriptor {
    /// runstruct_vasp 作业
    pub fn runstruct(workdir: &Path, walltime: &str) -> Self {
        JobDescriptor {
            name: workdir.display().to_string(),
            workdir: workdir.to_path_buf(),
            walltime: walltime.to_string(),
            join_output: true,
            script: RUNSTRUCT_SCRIPT.to_string(),
        }
    }

    /// qsub 参数
    pub fn qsub_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.join_output {
            args.push("-joe".to_string());
        }
        args.push("-N".to_string());
        args.push(self.name.clone());
        args.push("-l".to_string());
        args.push(format!("walltime={}", self.walltime));
        args
    }
}

/// 调度器提交能力
pub trait Scheduler {
    fn submit(&self, job: &JobDescriptor) -> Result<JobId>;
}

/// 调用 `qsub`
#[derive(Debug, Clone)]
pub struct Qsub {
    pub program: String,
}

impl Default for Qsub {
    fn default() -> Self {
        Qsub {
            program: "qsub".to_string(),
        }
    }
}

impl Scheduler for Qsub {
    fn submit(&self, job: &JobDescriptor) -> Result<JobId> {
        let args = job.qsub_args();
        log::debug!("{} {}", self.program, args.join(" "));

        let failed = |reason: String| AtatError::SubmissionFailed {
            dir: job.workdir.display().to_string(),
            reason,
        };

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(&job.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AtatError::CommandNotFound {
                    command: self.program.clone(),
                },
                _ => failed(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(job.script.as_bytes())
                .map_err(|e| failed(format!("writing script to {}: {}", self.program, e)))?;
        }

        let out = child
            .wait_with_output()
            .map_err(|e| failed(e.to_string()))?;

        if !out.status.success() {
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.program,
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        JobId::parse(&String::from_utf8_lossy(&out.stdout))
            .ok_or_else(|| failed(format!("{} returned no job id", self.program)))
    }
}
