// crates/fp_mesh/src/lib.rs

//! FoamPrep 网格字典生成
//!
//! 用原生代码生成四分之一圆柱的 `blockMeshDict`，供外部 `blockMesh` 使用。
//!
//! # 模块结构
//!
//! - [`geometry`]: O 型网格块拓扑（核心块 + 两个外壳块）
//! - [`grading`]: 近壁径向加密
//! - [`dict`]: OpenFOAM 字典写出
//! - [`patch_type`]: 改写已有字典中的 patch 类型
//! - [`vtk`]: 块骨架调试输出
//!
//! # 示例
//!
//! ```rust,ignore
//! use fp_config::MeshConfig;
//! use fp_mesh::generate;
//!
//! let summary = generate(&MeshConfig::default(), "case/system/blockMeshDict".as_ref())?;
//! println!("{} cells", summary.n_cells);
//! ```

#![warn(clippy::all)]

pub mod dict;
pub mod error;
pub mod geometry;
pub mod grading;
pub mod patch_type;
pub mod vtk;

use std::path::{Path, PathBuf};

use fp_config::MeshConfig;

// 重导出核心类型
pub use dict::BlockMeshDict;
pub use error::{MeshError, MeshResult};
pub use geometry::{ArcEdge, HexBlock, Patch, PatchKind, QuarterCylinder, Vertex};
pub use grading::{solve_wall_grading, WallGrading};
pub use patch_type::enforce_patch_type;

/// 网格生成结果摘要
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    /// blockMeshDict 路径
    pub dict_path: PathBuf,
    /// 调试 VTK 路径
    pub debug_vtk: Option<PathBuf>,
    /// 块数
    pub n_blocks: usize,
    /// 预计单元数
    pub n_cells: usize,
}

/// 校验配置、构建几何并写出 blockMeshDict
///
/// 若配置了 `debug_vtk`，同时写出块骨架；路径按原样使用，由调用方负责解析。
pub fn generate(config: &MeshConfig, dict_path: &Path) -> MeshResult<MeshSummary> {
    config.validate()?;

    let geometry = QuarterCylinder::from_config(config)?;
    let n_cells = geometry.n_cells()?;
    let dict = BlockMeshDict::new(&geometry);
    dict.write(dict_path)?;

    // 写出后再次确认对称面类型，与手工修改过的模板保持同一约束
    enforce_patch_type(dict_path, &config.symmetry_patch, &config.effective_symmetry_type())?;

    let debug_vtk = match &config.debug_vtk {
        Some(path) => {
            vtk::write_debug_vtk(&geometry, path)?;
            tracing::info!("Debug VTK written to: {}", path.display());
            Some(path.clone())
        }
        None => None,
    };

    tracing::info!("blockMeshDict written to: {}", dict_path.display());

    Ok(MeshSummary {
        dict_path: dict_path.to_path_buf(),
        debug_vtk,
        n_blocks: geometry.blocks().len(),
        n_cells,
    })
}
