//! # submit 命令实现
//!
//! 在每个作业目录中准备 vasp.wrap 并提交 runstruct_vasp 作业。
//!
//! ## 功能
//! - 定位并复制 vasp.wrap
//! - 调用 str2ezvasp / ezvasp 生成 POSCAR、POTCAR
//! - 推导 NBANDS、MAGMOM 并改写 vasp.wrap
//! - 检查 jobid 后通过 qsub 提交
//!
//! 每个目录的文件路径与子进程都以该目录为根，不修改进程的当前目录。
//!
//! ## 依赖关系
//! - 使用 `cli/submit.rs` 定义的参数
//! - 使用 `atat/`, `parsers/`, `batch/`, `utils/`

use crate::atat::submit::{marker_path, submit_job, SubmitOutcome};
use crate::atat::tools::{self, SystemTools, ToolPolicy, Toolchain};
use crate::atat::{locator, params, wrap};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::submit::SubmitArgs;
use crate::error::{AtatError, Result};
use crate::models::DerivedParams;
use crate::parsers;
use crate::utils::output;
use crate::utils::pbs::{JobDescriptor, JobId, Qsub, Scheduler};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 单目录处理选项
#[derive(Debug, Clone)]
pub struct JobOptions {
    pub policy: ToolPolicy,
    pub walltime: String,
    pub dry_run: bool,
}

/// 单目录处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// 已有 jobid，未做任何修改
    AlreadySubmitted,
    /// vasp.wrap 已改写，未提交（dry run）
    Prepared(DerivedParams),
    /// 已提交
    Submitted(DerivedParams, JobId),
}

/// 汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "NBANDS")]
    nbands: String,
    #[tabled(rename = "MAGMOM")]
    magmom: String,
    #[tabled(rename = "Job ID")]
    job_id: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl SummaryRow {
    fn new(dir: &Path, params: Option<&DerivedParams>, job_id: &str, result: &str) -> Self {
        SummaryRow {
            directory: dir.display().to_string(),
            nbands: params.map(|p| p.nbands.to_string()).unwrap_or_default(),
            magmom: params
                .filter(|p| p.magnetic)
                .map(|p| p.magmom_values())
                .unwrap_or_default(),
            job_id: job_id.to_string(),
            result: result.to_string(),
        }
    }
}

/// 执行 submit 命令
pub fn execute(args: SubmitArgs) -> Result<()> {
    output::print_header("ATAT/VASP Job Submission");

    let dirs = super::resolve_dirs(
        &args.dirs,
        &args.discovery,
        crate::batch::collector::STRUCTURE_FILE,
    )?;
    if dirs.is_empty() {
        output::print_warning("No job directories found.");
        return Ok(());
    }
    output::print_info(&format!("Processing {} director(ies)", dirs.len()));

    let options = JobOptions {
        policy: if args.ignore_tool_errors {
            ToolPolicy::Ignore
        } else {
            ToolPolicy::FailFast
        },
        walltime: args.walltime.clone(),
        dry_run: args.dry_run,
    };
    let tools = SystemTools;
    let scheduler = Qsub {
        program: args.qsub.clone(),
    };

    let mut rows = Vec::new();
    let batch = BatchRunner::new(args.keep_going).run(&dirs, |dir| {
        match process_directory(dir, &tools, &scheduler, &options) {
            Ok(JobOutcome::AlreadySubmitted) => {
                output::print_skip(&format!(
                    "jobid file exists in {}. Skipping",
                    dir.display()
                ));
                rows.push(SummaryRow::new(dir, None, "", "already submitted"));
                ProcessResult::Skipped(dir.display().to_string())
            }
            Ok(JobOutcome::Prepared(p)) => {
                output::print_success(&format!("[DRY] {}: {}", dir.display(), p));
                rows.push(SummaryRow::new(dir, Some(&p), "", "prepared"));
                ProcessResult::Success(dir.display().to_string())
            }
            Ok(JobOutcome::Submitted(p, id)) => {
                output::print_success(&format!("{}: {}", dir.display(), p));
                println!("{}", id.status_reference());
                rows.push(SummaryRow::new(dir, Some(&p), id.as_str(), "submitted"));
                ProcessResult::Success(dir.display().to_string())
            }
            Err(e) => {
                output::print_error(&format!("{}: {}", dir.display(), e));
                rows.push(SummaryRow::new(dir, None, "", "failed"));
                ProcessResult::Failed(dir.display().to_string(), e.to_string())
            }
        }
    });

    if rows.len() > 1 {
        output::print_separator();
        println!("{}", Table::new(&rows));
    }

    output::print_separator();
    output::print_done(&format!(
        "Processed {} director(ies): {} succeeded, {} skipped, {} failed",
        batch.total(),
        batch.success,
        batch.skipped,
        batch.failed
    ));
    if batch.not_run > 0 {
        output::print_warning(&format!(
            "Stopped after first failure, {} director(ies) not processed (use --keep-going)",
            batch.not_run
        ));
    }

    if batch.failed > 0 {
        if batch.total() > 1 {
            for (dir, err) in &batch.failures {
                output::print_error(&format!("{}: {}", dir, err));
            }
        }
        return Err(AtatError::Other(format!(
            "{} of {} director(ies) failed",
            batch.failed,
            dirs.len()
        )));
    }

    Ok(())
}

/// 处理单个作业目录
pub fn process_directory(
    dir: &Path,
    toolchain: &dyn Toolchain,
    scheduler: &dyn Scheduler,
    options: &JobOptions,
) -> Result<JobOutcome> {
    // 作业名使用绝对路径
    let workdir: PathBuf = dir
        .canonicalize()
        .map_err(|_| AtatError::DirectoryNotFound {
            path: dir.display().to_string(),
        })?;

    // 正在运行的作业不能改写其 vasp.wrap
    if marker_path(&workdir).exists() {
        return Ok(JobOutcome::AlreadySubmitted);
    }

    match locator::locate_wrap(&workdir)? {
        locator::WrapSource::Local => {}
        locator::WrapSource::Copied(src) => {
            output::print_info(&format!("Copied {}", src.display()));
        }
    }

    tools::generate_inputs(toolchain, options.policy, &workdir)?;

    let (structure, valence) = parsers::read_vasp_inputs(&workdir)?;
    let derived = params::derive(&structure, &valence)?;
    log::info!(
        "{} ({}): {}",
        workdir.display(),
        structure.formula(),
        derived
    );

    tools::clean_inputs(toolchain, options.policy, &workdir)?;
    wrap::rewrite_wrap(&workdir.join(locator::WRAP_FILE), &derived)?;
    tools::regenerate_input(toolchain, options.policy, &workdir)?;

    if options.dry_run {
        return Ok(JobOutcome::Prepared(derived));
    }

    let job = JobDescriptor::runstruct(&workdir, &options.walltime);
    match submit_job(scheduler, &job)? {
        SubmitOutcome::AlreadySubmitted { .. } => Ok(JobOutcome::AlreadySubmitted),
        SubmitOutcome::Submitted(id) => Ok(JobOutcome::Submitted(derived, id)),
    }
}
