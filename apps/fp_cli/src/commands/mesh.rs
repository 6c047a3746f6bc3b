// apps/fp_cli/src/commands/mesh.rs

//! 网格字典生成命令
//!
//! 等价于流程第一步：`foamprep mesh -c <配置> -o <目录>`。

use anyhow::{bail, Context, Result};
use clap::Args;
use fp_workflow::{generate_mesh_dict, Pipeline};
use std::path::PathBuf;
use tracing::info;

use super::CaseArgs;

/// 网格参数
#[derive(Args, Debug)]
pub struct MeshArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    /// blockMeshDict 输出目录（相对算例目录）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行网格命令
pub fn execute(args: MeshArgs) -> Result<()> {
    let ctx = args.case.load()?;
    if !ctx.config_found {
        bail!("Configuration file not found: {}", ctx.config_path.display());
    }

    let dict_path = Pipeline::dict_path(&ctx.config, &ctx.case_dir, args.output.as_deref());
    let summary = generate_mesh_dict(&ctx.config_path, &dict_path, &ctx.case_dir)
        .context("生成 blockMeshDict 失败")?;

    info!("块数: {}, 单元数: {}", summary.n_blocks, summary.n_cells);
    println!("blockMeshDict written to: {}", summary.dict_path.display());
    if let Some(vtk) = &summary.debug_vtk {
        println!("Debug VTK written to: {}", vtk.display());
    }

    Ok(())
}
