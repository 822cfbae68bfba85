//! # 计算参数数据模型
//!
//! 默认价电子表（来自 POTCAR 的 ZVAL）与由结构推导出的 NBANDS / MAGMOM。
//!
//! ## 依赖关系
//! - 被 `parsers/potcar.rs` 构造 `ValenceTable`
//! - 被 `atat/params.rs`, `atat/wrap.rs` 使用

use std::fmt;

/// 元素符号 -> 默认价电子数，保持 POTCAR 中的出现顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValenceTable {
    entries: Vec<(String, f64)>,
}

impl ValenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖一个元素
    pub fn insert(&mut self, symbol: impl Into<String>, valence: f64) {
        let symbol = symbol.into();
        match self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            Some(entry) => entry.1 = valence,
            None => self.entries.push((symbol, valence)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| *v)
    }

    /// 元素符号列表（POTCAR 顺序），用于补全 VASP 4 格式的 POSCAR
    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for ValenceTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = ValenceTable::new();
        for (symbol, valence) in iter {
            table.insert(symbol, valence);
        }
        table
    }
}

/// 由结构推导出的计算参数
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedParams {
    /// 价电子总数
    pub electrons: f64,

    /// 原子数
    pub atoms: usize,

    /// 能带数
    pub nbands: usize,

    /// 是否含有磁性元素
    pub magnetic: bool,

    /// 每个原子的初始磁矩，顺序与结构一致
    pub magmoms: Vec<f64>,
}

impl DerivedParams {
    /// MAGMOM 的取值部分，例如 `2.5 2.5 0`
    pub fn magmom_values(&self) -> String {
        self.magmoms
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for DerivedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NELECT = {}, NIONS = {}, NBANDS = {}",
            self.electrons, self.atoms, self.nbands
        )?;
        if self.magnetic {
            write!(f, ", MAGMOM = {}", self.magmom_values())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valence_table_insert_overrides() {
        let mut table = ValenceTable::new();
        table.insert("Fe", 8.0);
        table.insert("Ni", 10.0);
        table.insert("Fe", 14.0);

        assert_eq!(table.symbols().len(), 2);
        assert_eq!(table.get("Fe"), Some(14.0));
        assert_eq!(table.symbols(), vec!["Fe", "Ni"]);
        assert_eq!(table.get("Co"), None);
    }

    #[test]
    fn test_magmom_values_formatting() {
        let params = DerivedParams {
            electrons: 21.0,
            atoms: 3,
            nbands: 19,
            magnetic: true,
            magmoms: vec![2.5, 2.0, 0.0],
        };
        assert_eq!(params.magmom_values(), "2.5 2 0");
        assert!(params.to_string().contains("MAGMOM = 2.5 2 0"));
    }
}
