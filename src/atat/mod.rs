//! # ATAT 作业准备核心
//!
//! 单个作业目录的处理流程：
//! ```text
//! locator ─▶ tools(str2ezvasp, ezvasp) ─▶ params ─▶ tools(cleanvasp)
//!         ─▶ wrap ─▶ tools(str2ezvasp) ─▶ submit
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`, `parsers/`, `utils/pbs.rs`
//! - 子模块: locator, params, wrap, tools, submit

pub mod locator;
pub mod params;
pub mod submit;
pub mod tools;
pub mod wrap;
