//! # VASP POSCAR 格式解析器
//!
//! 解析 `ezvasp` 生成的 POSCAR 文件。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line           # ATAT 在此写入元素符号
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+, 可选)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! VASP 4 格式没有元素行，符号依次尝试取自注释行和 POTCAR 的 TITEL 顺序。
//!
//! ## 依赖关系
//! - 被 `atat/params.rs`, `commands/` 使用
//! - 使用 `models/structure.rs`

use crate::error::{AtatError, Result};
use crate::models::{Lattice, Structure};

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref ELEMENT_SYMBOL: Regex = Regex::new(r"^[A-Z][a-z]?$").unwrap();
}

/// 解析 POSCAR/CONTCAR 文件
///
/// `fallback_symbols` 仅在 VASP 4 格式且注释行不含元素符号时使用。
pub fn parse_poscar_file(path: &Path, fallback_symbols: &[String]) -> Result<Structure> {
    let content = fs::read_to_string(path).map_err(|e| AtatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(&content, &path.display().to_string(), fallback_symbols)
}

fn parse_error(path: &str, reason: impl Into<String>) -> AtatError {
    AtatError::ParseError {
        format: "poscar".to_string(),
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// 从字符串内容解析 POSCAR 格式
pub fn parse_poscar_content(
    content: &str,
    path: &str,
    fallback_symbols: &[String],
) -> Result<Structure> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < 7 {
        return Err(parse_error(path, "File too short"));
    }

    // Line 0: Comment/name
    let name = lines[0].trim().to_string();

    // Line 1: Scaling factor
    let scale: f64 = lines[1]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| parse_error(path, "Invalid scaling factor at line 2"))?;

    // Lines 2-4: Lattice vectors
    let mut matrix = [[0.0; 3]; 3];
    for i in 0..3 {
        let parts: Vec<f64> = lines[2 + i]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(parse_error(
                path,
                format!("Invalid lattice vector at line {}", 3 + i),
            ));
        }
        matrix[i] = [parts[0] * scale, parts[1] * scale, parts[2] * scale];
    }
    let lattice = Lattice::from_vectors(matrix);

    // Line 5: Element symbols (VASP 5+) or atom counts (VASP 4)
    let line5_parts: Vec<&str> = lines[5].split_whitespace().collect();
    let first = line5_parts
        .first()
        .ok_or_else(|| parse_error(path, "Empty species line at line 6"))?;

    let (symbols, counts, atom_line_start) = if first.parse::<usize>().is_ok() {
        let counts = parse_counts(&line5_parts, path)?;
        let symbols = vasp4_symbols(&name, counts.len(), fallback_symbols).ok_or_else(|| {
            parse_error(
                path,
                format!(
                    "No element symbols for {} species (comment line or POTCAR)",
                    counts.len()
                ),
            )
        })?;
        (symbols, counts, 6)
    } else {
        let symbols: Vec<String> = line5_parts.iter().map(|s| strip_potcar_suffix(s)).collect();
        let count_parts: Vec<&str> = lines[6].split_whitespace().collect();
        let counts = parse_counts(&count_parts, path)?;
        (symbols, counts, 7)
    };

    if symbols.len() != counts.len() {
        return Err(parse_error(
            path,
            format!(
                "{} element symbols but {} atom counts",
                symbols.len(),
                counts.len()
            ),
        ));
    }

    // Check for "Selective dynamics" line
    let mut coord_line = atom_line_start;
    if lines.len() > coord_line
        && lines[coord_line]
            .trim()
            .to_lowercase()
            .starts_with('s')
    {
        coord_line += 1;
    }

    if lines.len() <= coord_line {
        return Err(parse_error(path, "Missing coordinate type line"));
    }

    // 坐标本身不参与参数推导，只校验行数与格式（Direct 与 Cartesian 相同）
    let total: usize = counts.iter().sum();
    let mut species: Vec<String> = Vec::with_capacity(total);
    let mut line_idx = coord_line + 1;

    for (symbol, &count) in symbols.iter().zip(counts.iter()) {
        for _ in 0..count {
            let valid = lines
                .get(line_idx)
                .map(|l| {
                    l.split_whitespace()
                        .take(3)
                        .filter(|s| s.parse::<f64>().is_ok())
                        .count()
                        == 3
                })
                .unwrap_or(false);

            if !valid {
                return Err(parse_error(
                    path,
                    format!("Expected {} atom positions, line {} is invalid", total, line_idx + 1),
                ));
            }

            species.push(symbol.clone());
            line_idx += 1;
        }
    }

    let structure = Structure::new(name, lattice, species);
    if structure.is_empty() {
        return Err(parse_error(path, "No atoms"));
    }

    Ok(structure)
}

fn parse_counts(parts: &[&str], path: &str) -> Result<Vec<usize>> {
    parts
        .iter()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| parse_error(path, format!("Invalid atom count '{}'", s)))
        })
        .collect()
}

/// VASP 4 格式：注释行恰好给出 n 个元素符号时使用之，否则退回 POTCAR 顺序
fn vasp4_symbols(comment: &str, n: usize, fallback: &[String]) -> Option<Vec<String>> {
    let from_comment: Vec<String> = comment
        .split_whitespace()
        .map(strip_potcar_suffix)
        .collect();

    if from_comment.len() == n && from_comment.iter().all(|s| ELEMENT_SYMBOL.is_match(s)) {
        return Some(from_comment);
    }

    if fallback.len() == n {
        return Some(fallback.to_vec());
    }

    None
}

/// `Fe_pv` -> `Fe`, `Ni/` -> `Ni`
fn strip_potcar_suffix(s: &str) -> String {
    s.split(['_', '/']).next().unwrap_or(s).to_string()
}
