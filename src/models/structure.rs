//! # 晶体结构数据模型
//!
//! 由 `POSCAR` 解析得到的只读结构表示，参数推导只关心原子顺序与元素符号。
//!
//! ## 依赖关系
//! - 被 `parsers/poscar.rs` 构造
//! - 被 `atat/params.rs` 使用

/// 晶格（行向量表示 a, b, c，单位 Å）
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 计算晶格体积
    pub fn volume(&self) -> f64 {
        let a = self.matrix[0];
        let b = self.matrix[1];
        let c = self.matrix[2];

        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }
}

/// 晶体结构
#[derive(Debug, Clone)]
pub struct Structure {
    /// 结构名称（POSCAR 注释行）
    pub name: String,

    pub lattice: Lattice,

    /// 每个原子的元素符号，顺序与 POSCAR 一致
    pub species: Vec<String>,
}

impl Structure {
    pub fn new(name: impl Into<String>, lattice: Lattice, species: Vec<String>) -> Self {
        Structure {
            name: name.into(),
            lattice,
            species,
        }
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// 按原子顺序迭代元素符号
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(String::as_str)
    }

    /// 计算化学式（按首次出现顺序，与 POSCAR 物种行一致）
    pub fn formula(&self) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for symbol in self.symbols() {
            match counts.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, n)) => *n += 1,
                None => counts.push((symbol, 1)),
            }
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
