//! # params 命令实现
//!
//! 读取已有的 POSCAR/POTCAR，打印将写入 vasp.wrap 的指令。
//!
//! ## 依赖关系
//! - 使用 `cli/params.rs` 定义的参数
//! - 使用 `parsers/`, `atat/params.rs`, `utils/output.rs`

use crate::atat::{params, wrap};
use crate::cli::params::ParamsArgs;
use crate::error::{AtatError, Result};
use crate::parsers::{poscar, potcar};
use crate::utils::output;

/// 执行 params 命令
pub fn execute(args: ParamsArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(AtatError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let potcar_path = args.potcar.unwrap_or_else(|| args.dir.join("POTCAR"));
    let poscar_path = args.poscar.unwrap_or_else(|| args.dir.join("POSCAR"));

    let valence = potcar::parse_potcar_file(&potcar_path)?;
    let structure = poscar::parse_poscar_file(&poscar_path, &valence.symbols())?;
    let derived = params::derive(&structure, &valence)?;

    output::print_info(&format!(
        "{} ({}): {} atoms, {} valence electrons, V = {:.3} Å^3",
        structure.name,
        structure.formula(),
        derived.atoms,
        derived.electrons,
        structure.lattice.volume().abs()
    ));

    for line in wrap::directives(&derived) {
        println!("{}", line);
    }

    Ok(())
}
