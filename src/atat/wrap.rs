//! # vasp.wrap 改写
//!
//! 在第二行插入 `NBANDS`，含磁性元素时在末尾追加 `MAGMOM`、`ISPIND`、`ISPIN`。
//! 改写前先移除即将写入的同名指令，重复运行不会产生重复行；
//! 非磁性结构只替换 `NBANDS`，用户自己写的自旋设置保持不变。
//!
//! 写回时行尾统一为 `\n`（CRLF 会被转换），文件末尾总有换行。
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs`, `commands/params.rs` 调用
//! - 使用 `models/params.rs`

use crate::error::{AtatError, Result};
use crate::models::DerivedParams;

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref DIRECTIVE_KEY: Regex = Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*=").unwrap();
}

/// 总是由参数推导写入的指令
const BAND_KEY: &str = "NBANDS";

/// 仅在含磁性元素时写入的指令
const SPIN_KEYS: &[&str] = &["MAGMOM", "ISPIND", "ISPIN"];

/// 内存中的 vasp.wrap
#[derive(Debug, Clone)]
pub struct WrapFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl WrapFile {
    /// 读取 vasp.wrap
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AtatError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self::from_content(path, &content))
    }

    pub fn from_content(path: &Path, content: &str) -> Self {
        WrapFile {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 写入推导出的参数
    pub fn apply(&mut self, params: &DerivedParams) {
        let before = self.lines.len();
        self.lines
            .retain(|line| !is_managed(line, params.magnetic));
        let removed = before - self.lines.len();
        if removed > 0 {
            log::debug!(
                "Removed {} previously inserted directive(s) from {}",
                removed,
                self.path.display()
            );
        }

        let mut inserted = directives(params).into_iter();
        if let Some(nbands) = inserted.next() {
            let at = self.lines.len().min(1);
            self.lines.insert(at, nbands);
        }
        self.lines.extend(inserted);
    }

    /// 原子写回：先写同目录临时文件，再 rename 覆盖
    pub fn save(&self) -> Result<()> {
        let mut content = self.lines.join("\n");
        content.push('\n');

        let tmp = self.path.with_extension("wrap.tmp");
        fs::write(&tmp, content).map_err(|e| AtatError::FileWriteError {
            path: tmp.display().to_string(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| AtatError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

/// 由参数生成的指令行：`NBANDS`，磁性时再加 `MAGMOM`、`ISPIND`、`ISPIN`
pub fn directives(params: &DerivedParams) -> Vec<String> {
    let mut lines = vec![format!("NBANDS = {}", params.nbands)];
    if params.magnetic {
        lines.push(format!("MAGMOM = {}", params.magmom_values()));
        lines.push("ISPIND = 2".to_string());
        lines.push("ISPIN = 2".to_string());
    }
    lines
}

/// 该行是否会被 `directives` 重新写入
fn is_managed(line: &str, magnetic: bool) -> bool {
    DIRECTIVE_KEY
        .captures(line)
        .map(|caps| {
            let key = caps[1].to_uppercase();
            key == BAND_KEY || (magnetic && SPIN_KEYS.contains(&key.as_str()))
        })
        .unwrap_or(false)
}

/// 读取、改写并保存 `path`
pub fn rewrite_wrap(path: &Path, params: &DerivedParams) -> Result<()> {
    let mut wrap = WrapFile::read(path)?;
    wrap.apply(params);
    wrap.save()?;
    log::debug!("Wrote {} lines to {}", wrap.lines().len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAP: &str = "[INCAR]\nPREC = high\nENCUT = 350\nISMEAR = 1\nSIGMA = 0.1\nKPPRA = 1000\nDOSTATIC\n";

    fn params(magmoms: Vec<f64>) -> DerivedParams {
        let magnetic = magmoms.iter().any(|m| *m != 0.0);
        DerivedParams {
            electrons: 16.0,
            atoms: magmoms.len(),
            nbands: 14,
            magnetic,
            magmoms,
        }
    }

    fn count(wrap: &WrapFile, key: &str) -> usize {
        wrap.lines()
            .iter()
            .filter(|l| l.starts_with(&format!("{} =", key)))
            .count()
    }

    #[test]
    fn test_nbands_is_second_line() {
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), WRAP);
        wrap.apply(&params(vec![0.0, 0.0]));

        assert_eq!(wrap.lines()[0], "[INCAR]");
        assert_eq!(wrap.lines()[1], "NBANDS = 14");
        assert_eq!(wrap.lines().len(), WRAP.lines().count() + 1);
    }

    #[test]
    fn test_non_magnetic_has_no_spin_lines() {
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), WRAP);
        wrap.apply(&params(vec![0.0, 0.0]));

        assert_eq!(count(&wrap, "MAGMOM"), 0);
        assert_eq!(count(&wrap, "ISPIN"), 0);
        assert_eq!(count(&wrap, "ISPIND"), 0);
    }

    #[test]
    fn test_magnetic_lines_appended() {
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), WRAP);
        wrap.apply(&params(vec![2.5, 0.0, 2.0]));

        let n = wrap.lines().len();
        assert_eq!(wrap.lines()[n - 3], "MAGMOM = 2.5 0 2");
        assert_eq!(wrap.lines()[n - 2], "ISPIND = 2");
        assert_eq!(wrap.lines()[n - 1], "ISPIN = 2");
        assert_eq!(count(&wrap, "MAGMOM"), 1);
    }

    #[test]
    fn test_repeated_apply_does_not_duplicate() {
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), WRAP);
        wrap.apply(&params(vec![2.5, 2.0]));
        wrap.apply(&params(vec![2.5, 2.0]));

        assert_eq!(count(&wrap, "NBANDS"), 1);
        assert_eq!(count(&wrap, "MAGMOM"), 1);
        assert_eq!(count(&wrap, "ISPIND"), 1);
        assert_eq!(count(&wrap, "ISPIN"), 1);
    }

    #[test]
    fn test_user_nbands_replaced_case_insensitive() {
        let content = "[INCAR]\nnbands=40\nPREC = high\n";
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), content);
        wrap.apply(&params(vec![0.0]));

        assert_eq!(wrap.lines(), &["[INCAR]", "NBANDS = 14", "PREC = high"]);
    }

    #[test]
    fn test_user_spin_settings_kept_when_not_magnetic() {
        let content = "[INCAR]\nPREC = high\nISPIN = 2\nMAGMOM = 4*1\n";
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), content);
        wrap.apply(&params(vec![0.0, 0.0]));

        assert_eq!(
            wrap.lines(),
            &["[INCAR]", "NBANDS = 14", "PREC = high", "ISPIN = 2", "MAGMOM = 4*1"]
        );
    }

    #[test]
    fn test_user_spin_settings_replaced_when_magnetic() {
        let content = "[INCAR]\nISPIN = 1\nmagmom = 4*1\nPREC = high\n";
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), content);
        wrap.apply(&params(vec![2.5, 0.0]));

        assert_eq!(
            wrap.lines(),
            &[
                "[INCAR]",
                "NBANDS = 14",
                "PREC = high",
                "MAGMOM = 2.5 0",
                "ISPIND = 2",
                "ISPIN = 2"
            ]
        );
    }

    #[test]
    fn test_crlf_normalized_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vasp.wrap");
        fs::write(&path, "[INCAR]\r\nPREC = high\r\n").unwrap();

        rewrite_wrap(&path, &params(vec![0.0])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[INCAR]\nNBANDS = 14\nPREC = high\n");
    }

    #[test]
    fn test_empty_wrap() {
        let mut wrap = WrapFile::from_content(Path::new("vasp.wrap"), "");
        wrap.apply(&params(vec![0.0]));
        assert_eq!(wrap.lines(), &["NBANDS = 14"]);
    }

    #[test]
    fn test_rewrite_wrap_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vasp.wrap");
        // 最后一行没有换行符
        fs::write(&path, "[INCAR]\nPREC = high").unwrap();

        rewrite_wrap(&path, &params(vec![2.5])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[INCAR]\nNBANDS = 14\nPREC = high\nMAGMOM = 2.5\nISPIND = 2\nISPIN = 2\n"
        );
        assert!(!dir.path().join("vasp.wrap.tmp").exists());
    }
}
