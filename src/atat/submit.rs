//! # 作业提交与 jobid 标记
//!
//! ```text
//! NotSubmitted ──jobid 存在──▶ AlreadySubmitted（不写文件、不调用调度器）
//!      │
//!      └──qsub 成功──▶ Submitted（写入 jobid）
//! ```
//!
//! 检查与写入 jobid 之间不是原子的，同一目录并发运行两次仍可能重复提交。
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 调用
//! - 使用 `utils/pbs.rs`

use crate::error::{AtatError, Result};
use crate::utils::pbs::{JobDescriptor, JobId, Scheduler};

use std::fs;
use std::path::{Path, PathBuf};

/// 标记文件名；作业脚本结束时删除
pub const JOBID_FILE: &str = "jobid";

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 已有 jobid，未提交
    AlreadySubmitted { marker: PathBuf },
    /// 新提交
    Submitted(JobId),
}

pub fn marker_path(dir: &Path) -> PathBuf {
    dir.join(JOBID_FILE)
}

/// 读取已有的 jobid（文件存在但为空时返回 `None`）
pub fn read_marker(dir: &Path) -> Result<Option<JobId>> {
    let path = marker_path(dir);
    let content = fs::read_to_string(&path).map_err(|e| AtatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(JobId::parse(&content))
}

/// 检查标记后提交 `job`，成功时写入 jobid
pub fn submit_job(scheduler: &dyn Scheduler, job: &JobDescriptor) -> Result<SubmitOutcome> {
    let marker = marker_path(&job.workdir);
    if marker.exists() {
        log::debug!("{} exists, not submitting", marker.display());
        return Ok(SubmitOutcome::AlreadySubmitted { marker });
    }

    let id = scheduler.submit(job)?;

    fs::write(&marker, format!("{}\n", id)).map_err(|e| AtatError::FileWriteError {
        path: marker.display().to_string(),
        source: e,
    })?;

    Ok(SubmitOutcome::Submitted(id))
}


#[cfg(test)]
mod tests {
    use super::testing::FakeScheduler;
    use super::*;
    use crate::utils::pbs::DEFAULT_WALLTIME;

    #[test]
    fn test_submit_writes_marker() {
        let dir = tempfile::tempdir().unwrap();
        let job = JobDescriptor::runstruct(dir.path(), DEFAULT_WALLTIME);
        let scheduler = FakeScheduler::replying("1234.master\n");

        let outcome = submit_job(&scheduler, &job).unwrap();
        let id = JobId::parse("1234.master").unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted(id.clone()));
        assert_eq!(read_marker(dir.path()).unwrap(), Some(id));
    }

    #[test]
    fn test_existing_marker_is_guard() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(JOBID_FILE), "77.master\n").unwrap();
        let job = JobDescriptor::runstruct(dir.path(), DEFAULT_WALLTIME);
        let scheduler = FakeScheduler::replying("1234.master");

        let outcome = submit_job(&scheduler, &job).unwrap();
        assert!(matches!(outcome, SubmitOutcome::AlreadySubmitted { .. }));
        assert!(scheduler.submitted.borrow().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join(JOBID_FILE)).unwrap(),
            "77.master\n"
        );
    }

    #[test]
    fn test_failed_submission_leaves_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        let job = JobDescriptor::runstruct(dir.path(), DEFAULT_WALLTIME);

        let err = submit_job(&FakeScheduler::failing(), &job).unwrap_err();
        assert!(matches!(err, AtatError::SubmissionFailed { .. }));
        assert!(!dir.path().join(JOBID_FILE).exists());
    }
}
