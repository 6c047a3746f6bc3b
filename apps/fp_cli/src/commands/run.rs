// apps/fp_cli/src/commands/run.rs

//! 运行完整流程命令

use anyhow::{bail, Result};
use clap::Args;
use fp_config::{ErrorPolicy, OutputMode};
use fp_workflow::{
    FileStorage, LoggingListener, Pipeline, PipelineRunner, ProcessExecutor, RunnerConfig, Storage,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::CaseArgs;

/// 运行参数
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    /// blockMeshDict 输出目录（相对算例目录）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 第一个失败后停止
    #[arg(long)]
    pub strict: bool,

    /// 仅列出步骤，不执行
    #[arg(long)]
    pub dry_run: bool,

    /// 外部工具输出写入 log.<tool>
    #[arg(long)]
    pub log_files: bool,

    /// 不保存运行报告
    #[arg(long)]
    pub no_report: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== FoamPrep 算例准备 ===");

    // 非严格模式下无效配置只让第一步失败，与缺失配置一致
    let ctx = args.case.load_with(!args.strict)?;
    info!("算例目录: {}", ctx.case_dir.display());

    let mut runner_config = RunnerConfig::from(&ctx.config.pipeline);
    if args.strict {
        runner_config.policy = ErrorPolicy::Halt;
    }
    if args.log_files {
        runner_config.output = OutputMode::LogFile;
    }
    runner_config.dry_run = args.dry_run;
    info!("失败策略: {}", runner_config.policy);

    let pipeline = Pipeline::standard(
        &ctx.config,
        &ctx.case_dir,
        &ctx.config_path,
        args.output.as_deref(),
    );

    let runner = PipelineRunner::new(&ctx.case_dir, ProcessExecutor::new()).with_config(runner_config);
    runner
        .events()
        .add_listener(Arc::new(LoggingListener::new("foamprep")));

    let report = runner.run(&pipeline);

    if !args.no_report && !args.dry_run {
        match FileStorage::for_case(&ctx.case_dir).and_then(|s| s.save_report(&report).map(|_| s)) {
            Ok(storage) => info!("运行报告: {}/{}.json", storage.directory().display(), report.id),
            Err(e) => warn!("Failed to save run report: {}", e),
        }
    }

    if let Some(failure) = report.first_failure() {
        bail!(
            "{} of {} steps failed; first failure at step {} ({}): {}",
            report.failed(),
            report.steps.len(),
            failure.index + 1,
            failure.name,
            failure.message.as_deref().unwrap_or("unknown error")
        );
    }

    info!("=== 准备完成 ===");
    Ok(())
}
