//! # status 命令实现
//!
//! 列出仍有 jobid 标记的作业目录，可选保存为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/status.rs` 定义的参数
//! - 使用 `atat/submit.rs`, `batch/`, `utils/output.rs`

use crate::atat::submit::{marker_path, read_marker, JOBID_FILE};
use crate::cli::status::StatusArgs;
use crate::error::{AtatError, Result};
use crate::utils::output;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 状态表的一行
#[derive(Debug, Clone, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Job ID")]
    job_id: String,
    #[tabled(rename = "Query")]
    query: String,
}

/// 执行 status 命令
pub fn execute(args: StatusArgs) -> Result<()> {
    output::print_header("Pending ATAT/VASP Jobs");

    let dirs = super::resolve_dirs(&args.dirs, &args.discovery, JOBID_FILE)?;
    let rows = collect_rows(&dirs)?;

    if rows.is_empty() {
        output::print_info("No jobid markers found.");
        return Ok(());
    }

    println!("{}", Table::new(&rows));
    output::print_done(&format!("{} pending job(s)", rows.len()));

    if let Some(path) = &args.csv {
        save_rows_csv(&rows, path)?;
        output::print_success(&format!("Saved to '{}'", path.display()));
    }

    Ok(())
}

fn collect_rows(dirs: &[PathBuf]) -> Result<Vec<StatusRow>> {
    let mut rows = Vec::new();
    for dir in dirs {
        if !marker_path(dir).is_file() {
            continue;
        }
        let (job_id, query) = match read_marker(dir)? {
            Some(id) => (id.to_string(), format!("qstat -f {}", id)),
            // qsub 未返回作业号时留下的空文件
            None => (String::new(), String::new()),
        };
        rows.push(StatusRow {
            directory: dir.display().to_string(),
            job_id,
            query,
        });
    }
    Ok(rows)
}

/// 保存结果到 CSV
fn save_rows_csv(rows: &[StatusRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| AtatError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_rows_only_marked() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("0");
        let b = root.path().join("1");
        let c = root.path().join("2");
        for d in [&a, &b, &c] {
            fs::create_dir_all(d).unwrap();
        }
        fs::write(a.join(JOBID_FILE), "11.master\n").unwrap();
        fs::write(c.join(JOBID_FILE), "").unwrap();

        let rows = collect_rows(&[a.clone(), b, c]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].job_id, "11.master");
        assert_eq!(rows[0].query, "qstat -f 11.master");
        assert_eq!(rows[1].job_id, "");
    }

    #[test]
    fn test_save_rows_csv() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("status.csv");
        let rows = vec![StatusRow {
            directory: "NiAl/3".to_string(),
            job_id: "11.master".to_string(),
            query: "qstat -f 11.master".to_string(),
        }];

        save_rows_csv(&rows, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "directory,job_id,query\nNiAl/3,11.master,qstat -f 11.master\n"
        );
    }
}
