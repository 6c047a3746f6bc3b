// apps/fp_cli/src/main.rs

//! FoamPrep 命令行界面
//!
//! 按固定顺序准备 DSMC 算例：生成 blockMeshDict、清理旧网格、调用
//! blockMesh / snappyHexMesh、重建初始状态目录、调用 dsmcInitialise。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// FoamPrep DSMC 算例准备工具
#[derive(Parser)]
#[command(name = "foamprep")]
#[command(author = "FoamPrep Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prepare a DSMC case: mesh, housekeeping and initialisation", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行完整流程
    Run(commands::run::RunArgs),
    /// 仅生成 blockMeshDict
    Mesh(commands::mesh::MeshArgs),
    /// 显示将要执行的步骤
    Plan(commands::plan::PlanArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
    /// 改写 blockMeshDict 中的 patch 类型
    PatchType(commands::patch_type::PatchTypeArgs),
    /// 列出历史运行
    History(commands::history::HistoryArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Mesh(args) => commands::mesh::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::PatchType(args) => commands::patch_type::execute(args),
        Commands::History(args) => commands::history::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "foamprep", "run", "-c", "case.json", "-o", "system", "--strict", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.case.config.as_deref(), Some(std::path::Path::new("case.json")));
                assert_eq!(args.output.as_deref(), Some(std::path::Path::new("system")));
                assert!(args.strict);
                assert!(args.dry_run);
                assert!(!args.log_files);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_patch_type() {
        let cli = Cli::try_parse_from([
            "foamprep",
            "patch-type",
            "system/blockMeshDict",
            "symmetryPlane",
            "symmetry",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::PatchType(_)));
    }
}
