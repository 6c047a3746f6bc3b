// crates/fp_workflow/src/mesh_step.rs

//! 网格字典生成步骤
//!
//! 流程第一步与 `foamprep mesh` 子命令共用：读取配置文件、解析调试输出路径、写出字典。

use std::path::Path;

use fp_config::{CaseConfig, PipelineConfig};
use fp_mesh::MeshSummary;

use crate::runner::WorkflowError;

/// 读取 `config_path` 并将 blockMeshDict 写到 `output`
///
/// 配置中的 `debug_vtk` 相对路径按 `case_dir` 解析。
pub fn generate_mesh_dict(
    config_path: &Path,
    output: &Path,
    case_dir: &Path,
) -> Result<MeshSummary, WorkflowError> {
    let case_config = CaseConfig::from_file(config_path)?;
    let mut mesh = case_config.mesh;
    mesh.debug_vtk = mesh
        .debug_vtk
        .map(|path| PipelineConfig::resolve(case_dir, &path));

    let summary = fp_mesh::generate(&mesh, output)?;
    tracing::debug!(
        "{} blocks, {} cells in {}",
        summary.n_blocks,
        summary.n_cells,
        summary.dict_path.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_vtk_resolved_against_case() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("case.json");
        std::fs::write(&config_path, r#"{ "mesh": { "debug_vtk": "debug/blocks.vtk" } }"#).unwrap();

        let output = dir.path().join("system/blockMeshDict");
        let summary = generate_mesh_dict(&config_path, &output, dir.path()).unwrap();

        assert_eq!(summary.dict_path, output);
        assert!(dir.path().join("debug/blocks.vtk").is_file());
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_mesh_dict(
            &dir.path().join("absent.json"),
            &dir.path().join("blockMeshDict"),
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Config(_)));
    }
}
