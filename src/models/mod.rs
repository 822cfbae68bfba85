//! # 数据模型模块
//!
//! 定义结构模型与推导出的计算参数。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `atat/` 使用
//! - 子模块: structure, params

pub mod params;
pub mod structure;

pub use params::{DerivedParams, ValenceTable};
pub use structure::{Lattice, Structure};
