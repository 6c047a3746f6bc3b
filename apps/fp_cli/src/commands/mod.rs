// apps/fp_cli/src/commands/mod.rs

//! 子命令实现

pub mod history;
pub mod mesh;
pub mod patch_type;
pub mod plan;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use clap::Args;
use fp_config::CaseConfig;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 缺省配置文件名（位于算例目录）
pub const DEFAULT_CONFIG_FILE: &str = "foamprep.json";

/// 算例定位参数
#[derive(Args, Debug, Clone)]
pub struct CaseArgs {
    /// 配置文件路径（缺省为 <算例目录>/foamprep.json）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 算例目录（缺省取配置中的 pipeline.case_dir，否则为当前目录）
    #[arg(long = "case")]
    pub case_dir: Option<PathBuf>,
}

/// 已解析的算例
#[derive(Debug, Clone)]
pub struct CaseContext {
    /// 配置
    pub config: CaseConfig,
    /// 配置文件路径
    pub config_path: PathBuf,
    /// 配置文件是否存在
    pub config_found: bool,
    /// 算例目录
    pub case_dir: PathBuf,
}

impl CaseArgs {
    /// 读取配置并确定算例目录
    ///
    /// 配置文件不存在时使用缺省配置并给出警告；文件存在但无效时报错。
    pub fn load(&self) -> Result<CaseContext> {
        self.load_with(false)
    }

    /// 同 [`CaseArgs::load`]，但 `lenient` 时无效配置也回退到缺省配置
    ///
    /// 完整流程使用此模式：配置问题记为第一步失败，其余步骤按失败策略继续。
    pub fn load_with(&self, lenient: bool) -> Result<CaseContext> {
        let base = self.case_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| base.join(DEFAULT_CONFIG_FILE));

        let config_found = config_path.is_file();
        let config = if config_found {
            match CaseConfig::from_file(&config_path) {
                Ok(config) => config,
                Err(e) if lenient => {
                    warn!(
                        "Invalid configuration {}: {}; using defaults",
                        config_path.display(),
                        e
                    );
                    CaseConfig::default()
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Invalid configuration {}", config_path.display())
                    });
                }
            }
        } else {
            warn!("Configuration {} not found, using defaults", config_path.display());
            CaseConfig::default()
        };

        let case_dir = self
            .case_dir
            .clone()
            .or_else(|| config.pipeline.case_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(CaseContext {
            config,
            config_path: absolute(&config_path),
            config_found,
            case_dir: absolute(&case_dir),
        })
    }
}

/// 尽量转为绝对路径，便于日志与报告
pub fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = CaseArgs {
            config: None,
            case_dir: Some(dir.path().to_path_buf()),
        };
        let ctx = args.load().unwrap();

        assert!(!ctx.config_found);
        assert_eq!(ctx.config, CaseConfig::default());
        assert!(ctx.config_path.ends_with(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "mesh": { "radius": -1 } }"#).unwrap();

        let args = CaseArgs {
            config: Some(path),
            case_dir: Some(dir.path().to_path_buf()),
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn test_invalid_config_is_lenient_for_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foamprep.json");
        std::fs::write(&path, r#"{ "mesh": { "radius": -1 } }"#).unwrap();

        let args = CaseArgs {
            config: Some(path),
            case_dir: Some(dir.path().to_path_buf()),
        };
        let ctx = args.load_with(true).unwrap();
        assert!(ctx.config_found);
        assert_eq!(ctx.config, CaseConfig::default());
    }

    #[test]
    fn test_case_dir_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let case = dir.path().join("cyl");
        std::fs::create_dir_all(&case).unwrap();
        let path = dir.path().join("foamprep.json");
        let json = format!(r#"{{ "pipeline": {{ "case_dir": {:?} }} }}"#, case.display().to_string());
        std::fs::write(&path, json).unwrap();

        let args = CaseArgs {
            config: Some(path),
            case_dir: None,
        };
        let ctx = args.load().unwrap();
        assert_eq!(ctx.case_dir, case.canonicalize().unwrap());
    }
}
