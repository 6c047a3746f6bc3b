// crates/fp_config/src/pipeline_config.rs

//! 流程配置
//!
//! 描述算例目录布局、外部工具名称与失败处理方式。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 步骤失败后的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// 记录失败并继续执行后续步骤
    #[default]
    Continue,
    /// 遇到第一个失败即停止，其余步骤标记为跳过
    Halt,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Halt => write!(f, "halt"),
        }
    }
}

/// 外部工具输出去向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// 继承当前终端
    #[default]
    Inherit,
    /// 写入算例目录下的 `log.<tool>`
    LogFile,
}

/// 外部工具名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// 块结构网格生成器
    pub block_mesh: String,
    /// 贴体网格生成器
    pub snappy_hex_mesh: String,
    /// snappyHexMesh 覆盖标志
    pub overwrite_flag: String,
    /// DSMC 初始化工具
    pub dsmc_initialise: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            block_mesh: "blockMesh".to_string(),
            snappy_hex_mesh: "snappyHexMesh".to_string(),
            overwrite_flag: "-overwrite".to_string(),
            dsmc_initialise: "dsmcInitialise".to_string(),
        }
    }
}

impl ToolsConfig {
    /// 全部工具名称
    pub fn programs(&self) -> [&str; 3] {
        [&self.block_mesh, &self.snappy_hex_mesh, &self.dsmc_initialise]
    }
}

/// 流程配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 算例目录，`None` 时使用当前目录
    pub case_dir: Option<PathBuf>,
    /// 旧网格目录，每次运行前删除
    pub mesh_dir: PathBuf,
    /// 初始状态目录
    pub state_dir: PathBuf,
    /// 初始条件模板目录
    pub template_dir: PathBuf,
    /// 外部工具
    pub tools: ToolsConfig,
    /// 失败策略
    pub error_policy: ErrorPolicy,
    /// 工具输出去向
    pub output: OutputMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            case_dir: None,
            mesh_dir: PathBuf::from("constant/polyMesh"),
            state_dir: PathBuf::from("0"),
            template_dir: PathBuf::from("0.orig"),
            tools: ToolsConfig::default(),
            error_policy: ErrorPolicy::default(),
            output: OutputMode::default(),
        }
    }
}

impl PipelineConfig {
    /// 将相对路径解析到算例目录下
    pub fn resolve(case_dir: &Path, rel: &Path) -> PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            case_dir.join(rel)
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, program) in [
            ("pipeline.tools.block_mesh", &self.tools.block_mesh),
            ("pipeline.tools.snappy_hex_mesh", &self.tools.snappy_hex_mesh),
            ("pipeline.tools.dsmc_initialise", &self.tools.dsmc_initialise),
        ] {
            if program.trim().is_empty() {
                return Err(ConfigError::Missing(key.to_string()));
            }
        }

        for (key, dir) in [
            ("pipeline.mesh_dir", &self.mesh_dir),
            ("pipeline.state_dir", &self.state_dir),
            ("pipeline.template_dir", &self.template_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Missing(key.to_string()));
            }
        }

        // Path::starts_with 按路径分量比较，相等也算包含
        if self.state_dir.starts_with(&self.template_dir)
            || self.template_dir.starts_with(&self.state_dir)
        {
            return Err(ConfigError::invalid(
                "pipeline.state_dir",
                self.state_dir.display(),
                "must not equal or be nested with the template directory",
            ));
        }

        Ok(())
    }
}
