//! # 解析器模块
//!
//! `ezvasp` 生成的 VASP 输入文件解析器。
//!
//! ## 依赖关系
//! - 被 `atat/` 与 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, potcar

pub mod poscar;
pub mod potcar;

use crate::error::Result;
use crate::models::{Structure, ValenceTable};
use std::path::Path;

/// 读取作业目录中的 POTCAR 与 POSCAR
///
/// POTCAR 先读，VASP 4 格式的 POSCAR 需要用它的元素顺序。
pub fn read_vasp_inputs(dir: &Path) -> Result<(Structure, ValenceTable)> {
    let valence = potcar::parse_potcar_file(&dir.join("POTCAR"))?;
    let structure = poscar::parse_poscar_file(&dir.join("POSCAR"), &valence.symbols())?;
    Ok((structure, valence))
}
