//! # 作业目录收集器
//!
//! 根据命令行给出的目录，或在根目录下按深度搜索，收集待处理的作业目录。
//!
//! ## 功能
//! - 显式目录列表（不存在时报错）
//! - 递归搜索包含指定文件（如 `str.out`）的子目录
//! - 跳过包含 `error` 标记的目录
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs`, `commands/status.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{AtatError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ATAT 结构文件，作业目录的识别标志
pub const STRUCTURE_FILE: &str = "str.out";

/// ATAT 在计算失败的目录中留下的标记
pub const ERROR_FILE: &str = "error";

/// 作业目录收集器
pub struct DirectoryCollector {
    /// 搜索根目录
    root: PathBuf,
    /// 目录中必须存在的文件
    required: String,
    /// 最大搜索深度（1 = 仅直接子目录）
    depth: usize,
    /// 是否保留含 error 标记的目录
    include_errored: bool,
}

impl DirectoryCollector {
    /// 创建新的收集器
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            required: STRUCTURE_FILE.to_string(),
            depth: 1,
            include_errored: false,
        }
    }

    /// 设置识别文件
    pub fn requiring(mut self, file: &str) -> Self {
        self.required = file.to_string();
        self
    }

    /// 设置搜索深度
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn include_errored(mut self, include: bool) -> Self {
        self.include_errored = include;
        self
    }

    /// 收集所有匹配的目录（按路径排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(AtatError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let mut dirs: Vec<PathBuf> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.into_path())
            .filter(|dir| self.accepts(dir))
            .collect();

        dirs.sort();
        Ok(dirs)
    }

    fn accepts(&self, dir: &Path) -> bool {
        if !dir.join(&self.required).is_file() {
            return false;
        }
        if !self.include_errored && dir.join(ERROR_FILE).exists() {
            log::debug!("Skipping {} ({} present)", dir.display(), ERROR_FILE);
            return false;
        }
        true
    }
}

/// 校验显式给出的目录列表；为空时使用当前目录
pub fn explicit_dirs(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if dirs.is_empty() {
        return Ok(vec![PathBuf::from(".")]);
    }

    dirs.iter()
        .map(|d| {
            if d.is_dir() {
                Ok(d.clone())
            } else {
                Err(AtatError::DirectoryNotFound {
                    path: d.display().to_string(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collect_by_depth() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("0").join(STRUCTURE_FILE));
        touch(&root.path().join("1").join(STRUCTURE_FILE));
        touch(&root.path().join("NiAl").join("3").join(STRUCTURE_FILE));
        fs::create_dir_all(root.path().join("empty")).unwrap();

        let shallow = DirectoryCollector::new(root.path().to_path_buf())
            .collect()
            .unwrap();
        assert_eq!(shallow, vec![root.path().join("0"), root.path().join("1")]);

        let deep = DirectoryCollector::new(root.path().to_path_buf())
            .depth(3)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&root.path().join("NiAl").join("3")));
    }

    #[test]
    fn test_errored_directories_skipped() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("0").join(STRUCTURE_FILE));
        touch(&root.path().join("1").join(STRUCTURE_FILE));
        touch(&root.path().join("1").join(ERROR_FILE));

        let dirs = DirectoryCollector::new(root.path().to_path_buf())
            .collect()
            .unwrap();
        assert_eq!(dirs, vec![root.path().join("0")]);

        let all = DirectoryCollector::new(root.path().to_path_buf())
            .include_errored(true)
            .collect()
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_requiring_other_file() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("0").join(STRUCTURE_FILE));
        touch(&root.path().join("1").join("jobid"));

        let dirs = DirectoryCollector::new(root.path().to_path_buf())
            .requiring("jobid")
            .collect()
            .unwrap();
        assert_eq!(dirs, vec![root.path().join("1")]);
    }

    #[test]
    fn test_explicit_dirs() {
        assert_eq!(explicit_dirs(&[]).unwrap(), vec![PathBuf::from(".")]);

        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing");
        assert!(explicit_dirs(&[root.path().to_path_buf()]).is_ok());
        assert!(matches!(
            explicit_dirs(&[missing]).unwrap_err(),
            AtatError::DirectoryNotFound { .. }
        ));
    }
}
