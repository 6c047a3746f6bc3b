// crates/fp_workflow/src/runner.rs

//! 流程运行器模块
//!
//! 逐步阻塞执行，步骤失败不会中断进程：
//! 默认策略记录失败后继续，`Halt` 策略在第一次失败后将其余步骤标记为跳过。

use std::path::{Path, PathBuf};
use std::time::Instant;

use fp_config::{ConfigError, ErrorPolicy, OutputMode, PipelineConfig};
use fp_mesh::MeshError;
use thiserror::Error;

use crate::events::{EventDispatcher, PipelineEvent};
use crate::executor::{is_not_found, ToolExecutor, ToolInvocation};
use crate::fs_ops;
use crate::mesh_step::generate_mesh_dict;
use crate::pipeline::Pipeline;
use crate::report::{RunReport, StepOutcome};
use crate::step::{RunId, Step, StepKind, StepStatus};

/// 工作流错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 网格字典生成错误
    #[error("Mesh generation error: {0}")]
    Mesh(#[from] MeshError),

    /// 外部工具无法启动
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// 可执行文件
        program: String,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 外部工具非零退出
    #[error("'{program}' exited with {}", exit_label(.exit_code))]
    ToolFailed {
        /// 可执行文件
        program: String,
        /// 退出码
        exit_code: Option<i32>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl WorkflowError {
    /// 外部工具退出码
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ToolFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// 运行器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerConfig {
    /// 失败策略
    pub policy: ErrorPolicy,
    /// 试运行：不产生任何副作用
    pub dry_run: bool,
    /// 工具输出去向
    pub output: OutputMode,
}

impl From<&PipelineConfig> for RunnerConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            policy: config.error_policy,
            dry_run: false,
            output: config.output,
        }
    }
}

/// 流程运行器
pub struct PipelineRunner<E: ToolExecutor> {
    /// 算例目录
    case_dir: PathBuf,
    /// 工具执行器
    executor: E,
    /// 运行器配置
    config: RunnerConfig,
    /// 事件分发器
    events: EventDispatcher,
}

impl<E: ToolExecutor> PipelineRunner<E> {
    /// 创建运行器
    pub fn new(case_dir: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            case_dir: case_dir.into(),
            executor,
            config: RunnerConfig::default(),
            events: EventDispatcher::new(),
        }
    }

    /// 设置配置
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// 获取配置
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// 获取算例目录
    pub fn case_dir(&self) -> &Path {
        &self.case_dir
    }

    /// 获取执行器
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// 获取事件分发器
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// 执行全部步骤
    pub fn run(&self, pipeline: &Pipeline) -> RunReport {
        let run_id = RunId::new();
        let started = Instant::now();
        let mut report = RunReport::new(run_id, &self.case_dir, self.config.policy, self.config.dry_run);

        self.events.emit(PipelineEvent::RunStarted {
            run_id,
            total_steps: pipeline.len(),
            dry_run: self.config.dry_run,
        });

        let mut halted = false;
        for (index, step) in pipeline.steps().iter().enumerate() {
            let command = step.kind.command_line();

            let skip_reason = if self.config.dry_run {
                Some("dry run")
            } else if halted {
                Some("halted after earlier failure")
            } else {
                None
            };

            if let Some(reason) = skip_reason {
                self.events.emit(PipelineEvent::StepSkipped {
                    run_id,
                    index,
                    name: step.name.clone(),
                    reason: reason.to_string(),
                });
                report.push(StepOutcome {
                    index,
                    name: step.name.clone(),
                    command,
                    status: StepStatus::Skipped,
                    exit_code: None,
                    duration_secs: 0.0,
                    message: Some(reason.to_string()),
                });
                continue;
            }

            self.events.emit(PipelineEvent::StepStarted {
                run_id,
                index,
                name: step.name.clone(),
                command: command.clone(),
            });

            let step_start = Instant::now();
            let result = self.execute_step(step);
            let duration_secs = step_start.elapsed().as_secs_f64();

            let outcome = match result {
                Ok(exit_code) => {
                    self.events.emit(PipelineEvent::StepCompleted {
                        run_id,
                        index,
                        name: step.name.clone(),
                        duration_secs,
                    });
                    StepOutcome {
                        index,
                        name: step.name.clone(),
                        command,
                        status: StepStatus::Succeeded,
                        exit_code,
                        duration_secs,
                        message: None,
                    }
                }
                Err(e) => {
                    if let WorkflowError::Spawn { program, source } = &e {
                        if is_not_found(source) {
                            tracing::warn!("'{}' was not found on PATH", program);
                        }
                    }
                    self.events.emit(PipelineEvent::StepFailed {
                        run_id,
                        index,
                        name: step.name.clone(),
                        error: e.to_string(),
                    });
                    if self.config.policy == ErrorPolicy::Halt {
                        halted = true;
                    }
                    StepOutcome {
                        index,
                        name: step.name.clone(),
                        command,
                        status: StepStatus::Failed,
                        exit_code: e.exit_code(),
                        duration_secs,
                        message: Some(e.to_string()),
                    }
                }
            };
            report.push(outcome);
        }

        report.finish();
        self.events.emit(PipelineEvent::RunFinished {
            run_id,
            succeeded: report.succeeded(),
            failed: report.failed(),
            skipped: report.skipped(),
            duration_secs: started.elapsed().as_secs_f64(),
        });

        report
    }

    /// 执行单个步骤，成功时返回外部工具退出码
    fn execute_step(&self, step: &Step) -> Result<Option<i32>, WorkflowError> {
        match &step.kind {
            StepKind::GenerateMeshDict { config, output } => {
                generate_mesh_dict(config, output, &self.case_dir)?;
                Ok(None)
            }
            StepKind::RemoveDir { path } => {
                if !fs_ops::remove_dir(path)? {
                    tracing::debug!("Nothing to remove at {}", path.display());
                }
                Ok(None)
            }
            StepKind::CreateDir { path } => {
                fs_ops::create_dir(path)?;
                Ok(None)
            }
            StepKind::CopyDirContents { from, to } => {
                let copied = fs_ops::copy_dir_contents(from, to)?;
                tracing::debug!("Copied {} files from {} to {}", copied, from.display(), to.display());
                Ok(None)
            }
            StepKind::RunTool { program, args } => {
                let invocation = ToolInvocation {
                    program: program.clone(),
                    args: args.clone(),
                    working_dir: self.case_dir.clone(),
                    output: self.config.output,
                };
                let output = self.executor.execute(&invocation)?;
                if output.success {
                    Ok(output.exit_code)
                } else {
                    Err(WorkflowError::ToolFailed {
                        program: program.clone(),
                        exit_code: output.exit_code,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ToolOutput;
    use parking_lot::Mutex;

    /// 记录调用并按程序名返回预设结果
    #[derive(Default)]
    struct ScriptedExecutor {
        calls: Mutex<Vec<String>>,
        failing: Vec<String>,
    }

    impl ToolExecutor for ScriptedExecutor {
        fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput, WorkflowError> {
            self.calls.lock().push(invocation.program.clone());
            if self.failing.contains(&invocation.program) {
                Ok(ToolOutput::failed(1))
            } else {
                Ok(ToolOutput::ok())
            }
        }
    }

    fn tool_pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new();
        pipeline
            .push(Step::tool("a", Vec::new()))
            .push(Step::tool("b", Vec::new()))
            .push(Step::tool("c", Vec::new()));
        pipeline
    }

    #[test]
    fn test_continue_policy_runs_everything() {
        let executor = ScriptedExecutor {
            failing: vec!["b".to_string()],
            ..Default::default()
        };
        let runner = PipelineRunner::new(".", executor);
        let report = runner.run(&tool_pipeline());

        assert_eq!(*runner.executor().calls.lock(), ["a", "b", "c"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.steps[1].exit_code, Some(1));
        assert!(report.steps[1].message.as_deref().unwrap().contains("status 1"));
    }

    #[test]
    fn test_halt_policy_skips_rest() {
        let executor = ScriptedExecutor {
            failing: vec!["a".to_string()],
            ..Default::default()
        };
        let runner = PipelineRunner::new(".", executor).with_config(RunnerConfig {
            policy: ErrorPolicy::Halt,
            ..Default::default()
        });
        let report = runner.run(&tool_pipeline());

        assert_eq!(*runner.executor().calls.lock(), ["a"]);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 2);
    }

    #[test]
    fn test_dry_run_has_no_side_effects() {
        let runner = PipelineRunner::new(".", ScriptedExecutor::default()).with_config(RunnerConfig {
            dry_run: true,
            ..Default::default()
        });
        let report = runner.run(&tool_pipeline());

        assert!(runner.executor().calls.lock().is_empty());
        assert_eq!(report.skipped(), 3);
        assert!(report.is_success());
    }

    #[test]
    fn test_signal_exit_label() {
        let err = WorkflowError::ToolFailed {
            program: "blockMesh".to_string(),
            exit_code: None,
        };
        assert_eq!(err.to_string(), "'blockMesh' exited with a signal");
        assert_eq!(err.exit_code(), None);
    }
}
