//! # 批量执行器
//!
//! 依次处理作业目录。调度器提交不应并发，这里只做顺序执行。
//!
//! ## 功能
//! - 进度条显示（多于一个目录时）
//! - 错误收集与汇总报告
//! - 可选在第一个失败处停止
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::utils::progress;

use std::path::{Path, PathBuf};

/// 单个目录处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如 jobid 已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (目录, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 因提前停止而未处理的目录数
    pub not_run: usize,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(path) => {
                log::debug!("{}: done", path);
                self.success += 1;
            }
            ProcessResult::Skipped(path) => {
                log::debug!("{}: skipped", path);
                self.skipped += 1;
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 失败后是否继续
    keep_going: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(keep_going: bool) -> Self {
        Self { keep_going }
    }

    /// 顺序处理目录列表
    pub fn run<F>(&self, dirs: &[PathBuf], mut processor: F) -> BatchResult
    where
        F: FnMut(&Path) -> ProcessResult,
    {
        let pb = (dirs.len() > 1)
            .then(|| progress::create_progress_bar(dirs.len() as u64, "Submitting"));

        let mut batch_result = BatchResult::default();

        for (i, dir) in dirs.iter().enumerate() {
            // 处理过程中的输出不能被进度条覆盖
            let result = match &pb {
                Some(pb) => pb.suspend(|| processor(dir)),
                None => processor(dir),
            };
            let stop = matches!(result, ProcessResult::Failed(..)) && !self.keep_going;
            batch_result.merge(result);

            if let Some(pb) = &pb {
                pb.inc(1);
            }

            if stop {
                batch_result.not_run = dirs.len() - i - 1;
                break;
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        batch_result
    }
}
