//! # VASP POTCAR 解析器
//!
//! 从 POTCAR 中提取每个元素的默认价电子数 (ZVAL)。
//!
//! 每个赝势块依次包含：
//! ```text
//!    TITEL  = PAW_PBE Fe_pv 02Aug2007
//!    POMASS =   55.847; ZVAL   =   14.000    mass and valenz
//! ```
//! 元素符号取 TITEL 的第二个字段并去掉 `_` 后缀，ZVAL 紧随其后。
//!
//! ## 依赖关系
//! - 被 `atat/params.rs`, `commands/` 使用
//! - 使用 `models/params.rs`

use crate::error::{AtatError, Result};
use crate::models::ValenceTable;

use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

lazy_static! {
    static ref TITEL: Regex = Regex::new(r"TITEL\s*=\s*\S+\s+([A-Za-z]+)").unwrap();
    static ref ZVAL: Regex = Regex::new(r"ZVAL\s*=\s*([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)").unwrap();
}

/// 解析 POTCAR 文件
pub fn parse_potcar_file(path: &Path) -> Result<ValenceTable> {
    let file = File::open(path).map_err(|e| AtatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| AtatError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        // 只有这两类行有用，避免把整个 POTCAR 留在内存里
        if line.contains("TITEL") || line.contains("ZVAL") {
            lines.push(line);
        }
    }

    parse_potcar_lines(lines.iter().map(String::as_str), &path.display().to_string())
}

/// 从行迭代器解析 POTCAR
pub fn parse_potcar_lines<'a, I>(lines: I, path: &str) -> Result<ValenceTable>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = ValenceTable::new();
    let mut current: Option<String> = None;

    for line in lines {
        if let Some(caps) = TITEL.captures(line) {
            current = Some(caps[1].to_string());
            continue;
        }

        if let Some(caps) = ZVAL.captures(line) {
            let symbol = current.take().ok_or_else(|| AtatError::ParseError {
                format: "potcar".to_string(),
                path: path.to_string(),
                reason: "ZVAL found before any TITEL".to_string(),
            })?;
            let valence: f64 = caps[1].parse().map_err(|_| AtatError::ParseError {
                format: "potcar".to_string(),
                path: path.to_string(),
                reason: format!("Invalid ZVAL '{}' for {}", &caps[1], symbol),
            })?;
            log::debug!("POTCAR: {} ZVAL = {}", symbol, valence);
            table.insert(symbol, valence);
        }
    }

    if table.is_empty() {
        return Err(AtatError::ParseError {
            format: "potcar".to_string(),
            path: path.to_string(),
            reason: "No TITEL/ZVAL entries found".to_string(),
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POTCAR_FE_NI: &str = r#"  PAW_PBE Fe_pv 02Aug2007
 14.0000000000000000
 parameters from PSCTR are:
   VRHFIN =Fe: 3p4s3d
   LEXCH  = PE
   TITEL  = PAW_PBE Fe_pv 02Aug2007
   POMASS =   55.847; ZVAL   =   14.000    mass and valenz
 End of Dataset
  PAW_PBE Ni 02Aug2007
   TITEL  = PAW_PBE Ni 02Aug2007
   POMASS =   58.690; ZVAL   =   10.000    mass and valenz
 End of Dataset
"#;

    #[test]
    fn test_parse_potcar_zval() {
        let table = parse_potcar_lines(POTCAR_FE_NI.lines(), "POTCAR").unwrap();
        assert_eq!(table.symbols(), vec!["Fe", "Ni"]);
        assert_eq!(table.get("Fe"), Some(14.0));
        assert_eq!(table.get("Ni"), Some(10.0));
    }

    #[test]
    fn test_parse_potcar_empty_fails() {
        let err = parse_potcar_lines("nothing here".lines(), "POTCAR").unwrap_err();
        assert!(matches!(err, AtatError::ParseError { .. }));
    }

    #[test]
    fn test_parse_potcar_zval_without_titel_fails() {
        let lines = ["   POMASS =   26.982; ZVAL   =    3.000    mass and valenz"];
        assert!(parse_potcar_lines(lines, "POTCAR").is_err());
    }

    #[test]
    fn test_parse_potcar_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("POTCAR");
        std::fs::write(&path, POTCAR_FE_NI).unwrap();

        let table = parse_potcar_file(&path).unwrap();
        assert_eq!(table.symbols().len(), 2);
    }
}
