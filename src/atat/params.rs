//! # 计算参数推导
//!
//! 由结构与默认价电子表推导 NBANDS，并由固定的磁性元素表生成 MAGMOM。
//!
//! ```text
//! NELECT = Σ ZVAL(atom)
//! NBANDS = trunc(max(8, 0.65 * NELECT + 2 * NIONS))
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs`, `commands/params.rs` 调用
//! - 使用 `models/`

use crate::error::{AtatError, Result};
use crate::models::{DerivedParams, Structure, ValenceTable};

/// 单原子单价电子也只能得到约 3 条能带，不足以收敛
pub const MIN_BANDS: usize = 8;

/// 每个价电子对应的能带数
const BANDS_PER_ELECTRON: f64 = 0.65;

/// 每个原子额外的能带数
const BANDS_PER_ION: f64 = 2.0;

/// 磁性元素及其初始磁矩 (μB)
pub const MAGNETIC_SPECIES: &[(&str, f64)] = &[("Fe", 2.5), ("Ni", 2.0)];

/// 查询磁性元素的初始磁矩
pub fn magnetic_moment(symbol: &str) -> Option<f64> {
    MAGNETIC_SPECIES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, m)| *m)
}

/// 价电子总数
pub fn total_electrons(structure: &Structure, valence: &ValenceTable) -> Result<f64> {
    structure.symbols().try_fold(0.0, |sum, symbol| {
        valence
            .get(symbol)
            .map(|n| sum + n)
            .ok_or_else(|| AtatError::MissingElementData {
                symbol: symbol.to_string(),
            })
    })
}

/// 能带数
pub fn band_count(electrons: f64, atoms: usize) -> usize {
    let bands = BANDS_PER_ELECTRON * electrons + BANDS_PER_ION * atoms as f64;
    (bands.max(MIN_BANDS as f64)) as usize
}

/// 推导全部参数
pub fn derive(structure: &Structure, valence: &ValenceTable) -> Result<DerivedParams> {
    let electrons = total_electrons(structure, valence)?;
    let atoms = structure.len();
    let nbands = band_count(electrons, atoms);

    let moments: Vec<Option<f64>> = structure.symbols().map(magnetic_moment).collect();
    let magnetic = moments.iter().any(Option::is_some);
    let magmoms = moments.into_iter().map(|m| m.unwrap_or(0.0)).collect();

    Ok(DerivedParams {
        electrons,
        atoms,
        nbands,
        magnetic,
        magmoms,
    })
}
