// crates/fp_config/src/lib.rs

//! FoamPrep 配置层
//!
//! 一个 JSON 文档描述整个算例准备流程：
//!
//! - [`mesh_config`]: 四分之一圆柱网格参数
//! - [`pipeline_config`]: 目录布局、外部工具名称、错误策略
//! - [`case_config`]: 顶层 `CaseConfig`，负责读写与校验
//! - [`error`]: 配置错误类型
//!
//! 所有字段均有默认值，`{}` 即为合法配置。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case_config;
pub mod error;
pub mod mesh_config;
pub mod pipeline_config;

// 重导出核心类型
pub use case_config::CaseConfig;
pub use error::ConfigError;
pub use mesh_config::{
    is_dict_word, MeshConfig, DEFAULT_SYMMETRY_TYPE, MAX_CELLS_PER_DIRECTION, MAX_TOTAL_CELLS,
};
pub use pipeline_config::{ErrorPolicy, OutputMode, PipelineConfig, ToolsConfig};
