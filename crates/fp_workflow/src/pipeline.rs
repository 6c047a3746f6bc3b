// crates/fp_workflow/src/pipeline.rs

//! 标准步骤序列
//!
//! ```text
//! 1. generateMeshDict   foamprep mesh -c <config> -o <system>
//! 2. removeMesh         rm -rf constant/polyMesh
//! 3. blockMesh
//! 4. snappyHexMesh -overwrite
//! 5. createStateDir     mkdir -p 0
//! 6. copyTemplate       cp -r 0.orig/. 0
//! 7. dsmcInitialise
//! ```

use std::path::{Path, PathBuf};

use fp_config::{CaseConfig, PipelineConfig};

use crate::step::{Step, StepKind};

/// blockMeshDict 文件名
pub const BLOCK_MESH_DICT: &str = "blockMeshDict";

/// 缺省字典目录（相对算例目录）
pub const DEFAULT_DICT_DIR: &str = "system";

/// 有序步骤序列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// 创建空序列
    pub fn new() -> Self {
        Self::default()
    }

    /// 标准算例准备流程
    ///
    /// `mesh_output` 为字典输出目录（命令行 `-o`），优先于配置中的 `mesh.output`。
    /// 相对路径均按算例目录解析。
    pub fn standard(
        config: &CaseConfig,
        case_dir: &Path,
        config_path: &Path,
        mesh_output: Option<&Path>,
    ) -> Self {
        let resolve = |rel: &Path| PipelineConfig::resolve(case_dir, rel);
        let pipeline = &config.pipeline;
        let tools = &pipeline.tools;

        let dict_path = Self::dict_path(config, case_dir, mesh_output);
        let state_dir = resolve(&pipeline.state_dir);

        let mut steps = Self::new();
        steps
            .push(Step::new(
                "generateMeshDict",
                StepKind::GenerateMeshDict {
                    config: config_path.to_path_buf(),
                    output: dict_path,
                },
            ))
            .push(Step::new(
                "removeMesh",
                StepKind::RemoveDir {
                    path: resolve(&pipeline.mesh_dir),
                },
            ))
            .push(Step::tool(tools.block_mesh.clone(), Vec::new()))
            .push(Step::tool(
                tools.snappy_hex_mesh.clone(),
                vec![tools.overwrite_flag.clone()],
            ))
            .push(Step::new(
                "createStateDir",
                StepKind::CreateDir {
                    path: state_dir.clone(),
                },
            ))
            .push(Step::new(
                "copyTemplate",
                StepKind::CopyDirContents {
                    from: resolve(&pipeline.template_dir),
                    to: state_dir,
                },
            ))
            .push(Step::tool(tools.dsmc_initialise.clone(), Vec::new()));

        steps
    }

    /// 计算 blockMeshDict 输出路径
    pub fn dict_path(config: &CaseConfig, case_dir: &Path, mesh_output: Option<&Path>) -> PathBuf {
        match (mesh_output, &config.mesh.output) {
            (Some(dir), _) => PipelineConfig::resolve(case_dir, dir).join(BLOCK_MESH_DICT),
            (None, Some(file)) => PipelineConfig::resolve(case_dir, file),
            (None, None) => case_dir.join(DEFAULT_DICT_DIR).join(BLOCK_MESH_DICT),
        }
    }

    /// 追加步骤
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// 全部步骤
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// 步骤数
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let config = CaseConfig::default();
        let case = Path::new("/cases/cyl");
        let pipeline = Pipeline::standard(&config, case, Path::new("/cases/cyl/case.json"), None);

        let names: Vec<&str> = pipeline.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "generateMeshDict",
                "removeMesh",
                "blockMesh",
                "snappyHexMesh",
                "createStateDir",
                "copyTemplate",
                "dsmcInitialise",
            ]
        );

        assert_eq!(
            pipeline.steps()[0].kind,
            StepKind::GenerateMeshDict {
                config: PathBuf::from("/cases/cyl/case.json"),
                output: PathBuf::from("/cases/cyl/system/blockMeshDict"),
            }
        );
        assert_eq!(pipeline.steps()[3].kind.command_line(), "snappyHexMesh -overwrite");
        assert_eq!(
            pipeline.steps()[5].kind,
            StepKind::CopyDirContents {
                from: PathBuf::from("/cases/cyl/0.orig"),
                to: PathBuf::from("/cases/cyl/0"),
            }
        );
    }

    #[test]
    fn test_dict_path_precedence() {
        let mut config = CaseConfig::default();
        let case = Path::new("/c");
        config.mesh.output = Some(PathBuf::from("custom/meshDict"));

        assert_eq!(
            Pipeline::dict_path(&config, case, None),
            PathBuf::from("/c/custom/meshDict")
        );
        assert_eq!(
            Pipeline::dict_path(&config, case, Some(Path::new("out"))),
            PathBuf::from("/c/out/blockMeshDict")
        );
    }

    #[test]
    fn test_custom_tools() {
        let mut config = CaseConfig::default();
        config.pipeline.tools.dsmc_initialise = "dsmcInitialisePar".to_string();
        let pipeline = Pipeline::standard(&config, Path::new("."), Path::new("case.json"), None);
        assert_eq!(pipeline.len(), 7);
        assert_eq!(pipeline.steps()[6].name, "dsmcInitialisePar");
    }
}
