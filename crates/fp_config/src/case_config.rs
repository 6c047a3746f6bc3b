// crates/fp_config/src/case_config.rs

//! CaseConfig - 算例准备总配置
//!
//! 网格参数与流程参数合并在同一个 JSON 文档中：
//!
//! ```json
//! {
//!   "mesh": { "radius": 0.5, "radial_cells": 8 },
//!   "pipeline": { "error_policy": "halt" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::mesh_config::MeshConfig;
use crate::pipeline_config::PipelineConfig;

/// 算例准备总配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 网格参数
    #[serde(default)]
    pub mesh: MeshConfig,

    /// 流程参数
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl CaseConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&content)?;
        tracing::debug!("Loaded case configuration from {}", path.display());
        Ok(config)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: CaseConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mesh.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline_config::ErrorPolicy;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CaseConfig::from_json("{}").unwrap();
        assert_eq!(config, CaseConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "mesh": { "radius": 2.0, "wall_thickness": 0.05 },
            "pipeline": { "error_policy": "halt", "tools": { "block_mesh": "myBlockMesh" } }
        }"#;
        let config = CaseConfig::from_json(json).unwrap();
        assert_eq!(config.mesh.radius, 2.0);
        assert_eq!(config.mesh.length, 1.0);
        assert_eq!(config.mesh.wall_thickness, Some(0.05));
        assert_eq!(config.pipeline.error_policy, ErrorPolicy::Halt);
        assert_eq!(config.pipeline.tools.block_mesh, "myBlockMesh");
        assert_eq!(config.pipeline.tools.dsmc_initialise, "dsmcInitialise");
    }

    #[test]
    fn test_invalid_json() {
        let err = CaseConfig::from_json("{ mesh: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = CaseConfig::from_json(r#"{ "mesh": { "length": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = CaseConfig::from_file("/nonexistent/foamprep.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");

        let mut config = CaseConfig::default();
        config.mesh.axial_cells = 42;
        config.save_to_file(&path).unwrap();

        let loaded = CaseConfig::from_file(&path).unwrap();
        assert_eq!(loaded.mesh.axial_cells, 42);
    }
}
