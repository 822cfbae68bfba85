//! # vasp.wrap 定位
//!
//! 依次查找 `./vasp.wrap`、`../vasp.wrap`、`../../vasp.wrap`。
//! 在上级目录找到时复制到作业目录；本地已存在时不做任何修改。
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 调用

use crate::error::{AtatError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// ATAT 的 VASP 包装配置文件名
pub const WRAP_FILE: &str = "vasp.wrap";

/// 向上查找的最大层数
const MAX_PARENT_LEVELS: usize = 2;

/// vasp.wrap 的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapSource {
    /// 作业目录中已有
    Local,
    /// 从上级目录复制而来
    Copied(PathBuf),
}

/// 候选路径，按查找顺序排列
pub fn candidate_paths(dir: &Path) -> Vec<PathBuf> {
    let mut base = dir.to_path_buf();
    let mut candidates = vec![base.join(WRAP_FILE)];
    for _ in 0..MAX_PARENT_LEVELS {
        base = base.join("..");
        candidates.push(base.join(WRAP_FILE));
    }
    candidates
}

/// 确保 `dir/vasp.wrap` 存在
pub fn locate_wrap(dir: &Path) -> Result<WrapSource> {
    let candidates = candidate_paths(dir);
    let local = &candidates[0];

    if local.is_file() {
        log::debug!("Using local {}", local.display());
        return Ok(WrapSource::Local);
    }

    let found = candidates[1..].iter().find(|p| p.is_file()).cloned();
    match found {
        Some(src) => {
            fs::copy(&src, local).map_err(|e| AtatError::FileWriteError {
                path: local.display().to_string(),
                source: e,
            })?;
            log::debug!("Copied {} -> {}", src.display(), local.display());
            Ok(WrapSource::Copied(src))
        }
        None => Err(AtatError::ConfigNotFound {
            searched: candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> (tempfile::TempDir, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let job = root.path().join("NiAl").join("3");
        fs::create_dir_all(&job).unwrap();
        (root, job)
    }

    #[test]
    fn test_local_wrap_untouched() {
        let (root, job) = nested();
        fs::write(job.join(WRAP_FILE), "[INCAR]\nlocal\n").unwrap();
        fs::write(root.path().join(WRAP_FILE), "[INCAR]\nroot\n").unwrap();

        assert_eq!(locate_wrap(&job).unwrap(), WrapSource::Local);
        let content = fs::read_to_string(job.join(WRAP_FILE)).unwrap();
        assert_eq!(content, "[INCAR]\nlocal\n");
    }

    #[test]
    fn test_copy_from_parent() {
        let (_root, job) = nested();
        let parent = job.join("..").join(WRAP_FILE);
        fs::write(&parent, "[INCAR]\nparent\n").unwrap();

        let source = locate_wrap(&job).unwrap();
        assert!(matches!(source, WrapSource::Copied(_)));
        let content = fs::read_to_string(job.join(WRAP_FILE)).unwrap();
        assert_eq!(content, "[INCAR]\nparent\n");
    }

    #[test]
    fn test_nearest_parent_wins() {
        let (root, job) = nested();
        fs::write(job.join("..").join(WRAP_FILE), "near\n").unwrap();
        fs::write(root.path().join(WRAP_FILE), "far\n").unwrap();

        locate_wrap(&job).unwrap();
        assert_eq!(fs::read_to_string(job.join(WRAP_FILE)).unwrap(), "near\n");
    }

    #[test]
    fn test_copy_from_grandparent() {
        let (root, job) = nested();
        fs::write(root.path().join(WRAP_FILE), "far\n").unwrap();

        locate_wrap(&job).unwrap();
        assert_eq!(fs::read_to_string(job.join(WRAP_FILE)).unwrap(), "far\n");
    }

    #[test]
    fn test_missing_everywhere() {
        let (_root, job) = nested();
        let err = locate_wrap(&job).unwrap_err();
        match err {
            AtatError::ConfigNotFound { searched } => assert_eq!(searched.len(), 3),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!job.join(WRAP_FILE).exists());
    }
}
