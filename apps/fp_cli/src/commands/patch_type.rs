// apps/fp_cli/src/commands/patch_type.rs

//! 改写 patch 类型命令

use anyhow::{Context, Result};
use clap::Args;
use fp_mesh::enforce_patch_type;
use std::path::PathBuf;

/// patch 类型参数
#[derive(Args, Debug)]
pub struct PatchTypeArgs {
    /// blockMeshDict 路径
    pub dict: PathBuf,

    /// patch 名称
    pub patch: String,

    /// 目标类型
    pub patch_type: String,
}

/// 执行改写命令
pub fn execute(args: PatchTypeArgs) -> Result<()> {
    enforce_patch_type(&args.dict, &args.patch, &args.patch_type)
        .with_context(|| format!("无法改写 {}", args.dict.display()))?;
    println!(
        "Patch '{}' set to type '{}' in {}",
        args.patch,
        args.patch_type,
        args.dict.display()
    );
    Ok(())
}
