// apps/fp_cli/src/commands/history.rs

//! 历史运行列表

use anyhow::Result;
use clap::Args;
use fp_workflow::{FileStorage, Storage, REPORT_DIR};
use std::path::PathBuf;

/// 历史参数
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// 算例目录
    #[arg(long = "case", default_value = ".")]
    pub case_dir: PathBuf,

    /// 以 JSON 输出最近一次运行
    #[arg(long)]
    pub latest: bool,
}

/// 执行历史命令
pub fn execute(args: HistoryArgs) -> Result<()> {
    let dir = args.case_dir.join(REPORT_DIR);
    let Some(storage) = FileStorage::open_existing(&dir) else {
        println!("No runs recorded in {}", dir.display());
        return Ok(());
    };

    if args.latest {
        match storage.latest()? {
            Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            None => println!("No runs recorded in {}", storage.directory().display()),
        }
        return Ok(());
    }

    let reports = storage.list_reports()?;
    if reports.is_empty() {
        println!("No runs recorded in {}", storage.directory().display());
        return Ok(());
    }

    for report in &reports {
        let mode = if report.dry_run { " dry-run" } else { "" };
        println!(
            "{}  {}  {:>2} ok {:>2} failed {:>2} skipped  [{}{}]",
            report.started_at.format("%Y-%m-%d %H:%M:%S"),
            report.id,
            report.succeeded(),
            report.failed(),
            report.skipped(),
            report.policy,
            mode
        );
    }

    Ok(())
}
