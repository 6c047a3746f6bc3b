// crates/fp_workflow/src/executor.rs

//! 外部工具调用
//!
//! [`ToolExecutor`] 隔离进程创建，测试中可替换为记录调用的实现。

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use fp_config::OutputMode;

use crate::runner::WorkflowError;

/// 一次工具调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// 可执行文件
    pub program: String,
    /// 参数
    pub args: Vec<String>,
    /// 工作目录（算例目录）
    pub working_dir: PathBuf,
    /// 输出去向
    pub output: OutputMode,
}

impl ToolInvocation {
    /// 日志文件路径 `log.<tool>`，与 OpenFOAM `runApplication` 约定一致
    pub fn log_path(&self) -> PathBuf {
        let name = Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone());
        self.working_dir.join(format!("log.{}", name))
    }
}

/// 工具退出结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutput {
    /// 退出码，被信号终止时为 `None`
    pub exit_code: Option<i32>,
    /// 是否成功
    pub success: bool,
}

impl ToolOutput {
    /// 成功退出
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
        }
    }

    /// 以指定退出码失败
    pub fn failed(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            success: false,
        }
    }
}

/// 工具执行器trait
pub trait ToolExecutor: Send + Sync {
    /// 阻塞执行一次调用
    ///
    /// 工具启动失败返回错误；工具以非零码退出时返回 `success == false` 的结果。
    fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput, WorkflowError>;

    /// 获取执行器名称 (用于调试)
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// 进程执行器
///
/// 在算例目录中启动子进程并等待其结束，标准输入置空。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// 创建进程执行器
    pub fn new() -> Self {
        Self
    }
}

impl ToolExecutor for ProcessExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput, WorkflowError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null());

        if invocation.output == OutputMode::LogFile {
            let log_path = invocation.log_path();
            let log = File::create(&log_path)?;
            command.stdout(Stdio::from(log.try_clone()?));
            command.stderr(Stdio::from(log));
            tracing::debug!("Capturing {} output in {}", invocation.program, log_path.display());
        }

        let status = command.status().map_err(|source| WorkflowError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        Ok(ToolOutput {
            exit_code: status.code(),
            success: status.success(),
        })
    }

    fn name(&self) -> &str {
        "ProcessExecutor"
    }
}

/// 在 `PATH` 中查找可执行文件
///
/// 含路径分隔符的程序名按原样检查。
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

/// 启动失败是否因为找不到程序
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}
