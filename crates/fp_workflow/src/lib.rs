// crates/fp_workflow/src/lib.rs

//! FoamPrep 工作流模块
//!
//! 按固定顺序准备 DSMC 算例：生成网格字典、清理旧网格、调用外部网格工具、
//! 重建初始状态目录、调用 DSMC 初始化工具。
//!
//! # 模块结构
//!
//! - [`step`]: 步骤定义与状态
//! - [`pipeline`]: 标准步骤序列
//! - [`fs_ops`]: 目录清理、创建与模板复制
//! - [`mesh_step`]: 网格字典生成步骤
//! - [`executor`]: 外部工具调用
//! - [`runner`]: 顺序执行与失败策略
//! - [`report`]: 运行报告
//! - [`events`]: 事件系统
//! - [`storage`]: 运行报告持久化
//!
//! # 示例
//!
//! ```rust,ignore
//! use fp_config::CaseConfig;
//! use fp_workflow::{Pipeline, PipelineRunner, ProcessExecutor, RunnerConfig};
//!
//! let config = CaseConfig::from_file("case.json")?;
//! let pipeline = Pipeline::standard(&config, "case".as_ref(), "case.json".as_ref(), None);
//! let runner = PipelineRunner::new("case", ProcessExecutor::default())
//!     .with_config(RunnerConfig::from(&config.pipeline));
//! let report = runner.run(&pipeline);
//! ```

#![warn(clippy::all)]

pub mod events;
pub mod executor;
pub mod fs_ops;
pub mod mesh_step;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod step;
pub mod storage;

// 重导出核心类型
pub use events::{EventDispatcher, EventListener, FnListener, LoggingListener, PipelineEvent};
pub use executor::{find_on_path, ProcessExecutor, ToolExecutor, ToolInvocation, ToolOutput};
pub use mesh_step::generate_mesh_dict;
pub use pipeline::Pipeline;
pub use report::{RunReport, StepOutcome};
pub use runner::{PipelineRunner, RunnerConfig, WorkflowError};
pub use step::{RunId, Step, StepKind, StepStatus};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, REPORT_DIR};
