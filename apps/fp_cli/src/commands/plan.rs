// apps/fp_cli/src/commands/plan.rs

//! 显示流程步骤

use anyhow::Result;
use clap::Args;
use fp_workflow::Pipeline;
use std::path::PathBuf;

use super::CaseArgs;

/// 计划参数
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    /// blockMeshDict 输出目录（相对算例目录）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行计划命令
pub fn execute(args: PlanArgs) -> Result<()> {
    let ctx = args.case.load()?;
    let pipeline = Pipeline::standard(
        &ctx.config,
        &ctx.case_dir,
        &ctx.config_path,
        args.output.as_deref(),
    );

    println!("算例目录: {}", ctx.case_dir.display());
    println!("配置文件: {}{}", ctx.config_path.display(), if ctx.config_found { "" } else { " (missing)" });
    println!("失败策略: {}", ctx.config.pipeline.error_policy);
    println!();
    for (i, step) in pipeline.steps().iter().enumerate() {
        println!("  {:>2}. {:<18} {}", i + 1, step.name, step.kind.command_line());
    }

    Ok(())
}
