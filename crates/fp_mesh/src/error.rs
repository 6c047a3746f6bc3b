// crates/fp_mesh/src/error.rs

//! 网格字典生成错误类型

use std::path::PathBuf;

use fp_config::ConfigError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 配置错误
    #[error("Invalid mesh configuration: {0}")]
    Config(#[from] ConfigError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 径向加密无解
    #[error("Cannot grade {count} cells over {length} with end size {end_size}: {reason}")]
    Grading {
        /// 边长
        length: f64,
        /// 单元数
        count: usize,
        /// 末端单元尺寸
        end_size: f64,
        /// 原因
        reason: String,
    },

    /// 单元数溢出
    #[error("Cell count overflows for blocks {cells:?}")]
    CellCountOverflow {
        /// 各块三个方向的单元数
        cells: Vec<[usize; 3]>,
    },

    /// 字典中未找到可改写的 patch
    #[error("Failed to set patch '{patch}' type to '{patch_type}' in {}", .path.display())]
    PatchNotFound {
        /// patch 名称
        patch: String,
        /// 目标类型
        patch_type: String,
        /// 字典路径
        path: PathBuf,
    },
}
