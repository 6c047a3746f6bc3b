// apps/fp_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查配置文件、模板目录与外部工具是否就绪。

use anyhow::{bail, Result};
use clap::Args;
use fp_config::{CaseConfig, PipelineConfig};
use fp_workflow::find_on_path;
use std::path::Path;
use tracing::{error, info, warn};

use super::{absolute, CaseArgs};

/// 验证参数
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== FoamPrep 配置验证 ===");

    let mut result = ValidationResult::default();

    let base = args.case.case_dir.clone().unwrap_or_else(|| ".".into());
    let config_path = args
        .case
        .config
        .clone()
        .unwrap_or_else(|| base.join(super::DEFAULT_CONFIG_FILE));

    println!("\n检查配置文件: {}", config_path.display());
    let config = validate_config(&config_path, &mut result);

    if let Some(config) = &config {
        let case_dir = args
            .case
            .case_dir
            .clone()
            .or_else(|| config.pipeline.case_dir.clone())
            .unwrap_or(base);
        let case_dir = absolute(&case_dir);

        println!("\n检查算例目录: {}", case_dir.display());
        validate_case(config, &case_dir, &mut result);

        println!("\n检查外部工具");
        validate_tools(config, &mut result);
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) -> Option<CaseConfig> {
    if !path.is_file() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return None;
    }

    match CaseConfig::from_file(path) {
        Ok(config) => {
            println!("  ✓ 配置文件有效");
            if config.mesh.wall_thickness.is_none() {
                println!("  · 未设置 wall_thickness，径向网格均匀分布");
            }
            Some(config)
        }
        Err(e) => {
            result.add_error(format!("配置无效: {}", e));
            None
        }
    }
}

fn validate_case(config: &CaseConfig, case_dir: &Path, result: &mut ValidationResult) {
    if !case_dir.is_dir() {
        result.add_error(format!("算例目录不存在: {}", case_dir.display()));
        return;
    }

    let template = PipelineConfig::resolve(case_dir, &config.pipeline.template_dir);
    if template.is_dir() {
        println!("  ✓ 模板目录: {}", template.display());
    } else {
        result.add_warning(format!("模板目录不存在: {}", template.display()));
    }

    let state = PipelineConfig::resolve(case_dir, &config.pipeline.state_dir);
    if state.exists() {
        println!("  · 状态目录已存在，将被模板内容覆盖: {}", state.display());
    }

    let mesh = PipelineConfig::resolve(case_dir, &config.pipeline.mesh_dir);
    if mesh.exists() {
        println!("  · 旧网格将被删除: {}", mesh.display());
    }
}

fn validate_tools(config: &CaseConfig, result: &mut ValidationResult) {
    for program in config.pipeline.tools.programs() {
        match find_on_path(program) {
            Some(path) => println!("  ✓ {} -> {}", program, path.display()),
            None => result.add_warning(format!("未在 PATH 中找到 {}", program)),
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!();
    for err in &result.errors {
        error!("{}", err);
        println!("  ✗ {}", err);
    }
    for warning in &result.warnings {
        warn!("{}", warning);
        println!("  ! {}", warning);
    }

    let passed = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if passed {
        println!("\n验证通过 ({} 个警告)", result.warnings.len());
        Ok(())
    } else {
        bail!(
            "验证失败: {} 个错误, {} 个警告{}",
            result.errors.len(),
            result.warnings.len(),
            if strict { " (严格模式)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_strictness() {
        let mut result = ValidationResult::default();
        assert!(result.is_ok_strict());

        result.add_warning("tool missing");
        assert!(result.is_ok());
        assert!(!result.is_ok_strict());

        result.add_error("bad config");
        assert!(!result.is_ok());
    }

    #[test]
    fn test_missing_template_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = ValidationResult::default();

        validate_case(&CaseConfig::default(), dir.path(), &mut result);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);

        std::fs::create_dir_all(dir.path().join("0.orig")).unwrap();
        let mut result = ValidationResult::default();
        validate_case(&CaseConfig::default(), dir.path(), &mut result);
        assert!(result.is_ok_strict());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foamprep.json");
        std::fs::write(&path, "not json").unwrap();

        let mut result = ValidationResult::default();
        assert!(validate_config(&path, &mut result).is_none());
        assert_eq!(result.errors.len(), 1);
    }
}
