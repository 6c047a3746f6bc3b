// crates/fp_workflow/src/events.rs

//! 事件系统模块
//!
//! 提供流程事件的定义和分发机制。

use crate::step::RunId;
use parking_lot::RwLock;
use std::sync::Arc;

/// 流程事件
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// 运行开始
    RunStarted {
        /// 运行ID
        run_id: RunId,
        /// 步骤总数
        total_steps: usize,
        /// 是否试运行
        dry_run: bool,
    },
    /// 步骤开始
    StepStarted {
        /// 运行ID
        run_id: RunId,
        /// 步骤序号（从 0 开始）
        index: usize,
        /// 步骤名称
        name: String,
        /// 等价命令
        command: String,
    },
    /// 步骤成功
    StepCompleted {
        /// 运行ID
        run_id: RunId,
        /// 步骤序号
        index: usize,
        /// 步骤名称
        name: String,
        /// 耗时 (秒)
        duration_secs: f64,
    },
    /// 步骤失败
    StepFailed {
        /// 运行ID
        run_id: RunId,
        /// 步骤序号
        index: usize,
        /// 步骤名称
        name: String,
        /// 错误信息
        error: String,
    },
    /// 步骤跳过
    StepSkipped {
        /// 运行ID
        run_id: RunId,
        /// 步骤序号
        index: usize,
        /// 步骤名称
        name: String,
        /// 跳过原因
        reason: String,
    },
    /// 运行结束
    RunFinished {
        /// 运行ID
        run_id: RunId,
        /// 成功步数
        succeeded: usize,
        /// 失败步数
        failed: usize,
        /// 跳过步数
        skipped: usize,
        /// 总耗时 (秒)
        duration_secs: f64,
    },
}

impl PipelineEvent {
    /// 获取事件对应的运行ID
    pub fn run_id(&self) -> RunId {
        match self {
            Self::RunStarted { run_id, .. } => *run_id,
            Self::StepStarted { run_id, .. } => *run_id,
            Self::StepCompleted { run_id, .. } => *run_id,
            Self::StepFailed { run_id, .. } => *run_id,
            Self::StepSkipped { run_id, .. } => *run_id,
            Self::RunFinished { run_id, .. } => *run_id,
        }
    }

    /// 获取事件名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "RunStarted",
            Self::StepStarted { .. } => "StepStarted",
            Self::StepCompleted { .. } => "StepCompleted",
            Self::StepFailed { .. } => "StepFailed",
            Self::StepSkipped { .. } => "StepSkipped",
            Self::RunFinished { .. } => "RunFinished",
        }
    }
}

/// 事件监听器trait
pub trait EventListener: Send + Sync {
    /// 处理事件
    fn on_event(&self, event: &PipelineEvent);

    /// 获取监听器名称 (用于调试)
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// 函数式事件监听器
pub struct FnListener<F>
where
    F: Fn(&PipelineEvent) + Send + Sync,
{
    name: String,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&PipelineEvent) + Send + Sync,
{
    /// 创建函数式监听器
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&PipelineEvent) + Send + Sync,
{
    fn on_event(&self, event: &PipelineEvent) {
        (self.handler)(event);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 日志事件监听器
pub struct LoggingListener {
    /// 日志前缀
    prefix: String,
}

impl LoggingListener {
    /// 创建日志监听器
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl EventListener for LoggingListener {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted {
                run_id,
                total_steps,
                dry_run,
            } => {
                let mode = if *dry_run { " (dry run)" } else { "" };
                tracing::info!("{}: run {} started, {} steps{}", self.prefix, run_id, total_steps, mode);
            }
            PipelineEvent::StepStarted {
                index, name, command, ..
            } => {
                tracing::info!("{}: [{}] {} -> {}", self.prefix, index + 1, name, command);
            }
            PipelineEvent::StepCompleted {
                index,
                name,
                duration_secs,
                ..
            } => {
                tracing::info!("{}: [{}] {} done in {:.2}s", self.prefix, index + 1, name, duration_secs);
            }
            PipelineEvent::StepFailed {
                index, name, error, ..
            } => {
                tracing::warn!("{}: [{}] {} failed: {}", self.prefix, index + 1, name, error);
            }
            PipelineEvent::StepSkipped {
                index, name, reason, ..
            } => {
                tracing::info!("{}: [{}] {} skipped ({})", self.prefix, index + 1, name, reason);
            }
            PipelineEvent::RunFinished {
                run_id,
                succeeded,
                failed,
                skipped,
                duration_secs,
            } => {
                let summary = format!(
                    "run {} finished in {:.2}s: {} succeeded, {} failed, {} skipped",
                    run_id, duration_secs, succeeded, failed, skipped
                );
                if *failed > 0 {
                    tracing::warn!("{}: {}", self.prefix, summary);
                } else {
                    tracing::info!("{}: {}", self.prefix, summary);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}

/// 事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventDispatcher {
    /// 创建新的事件分发器
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 添加监听器
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        let name = listener.name().to_string();
        self.listeners.write().push(listener);
        tracing::debug!("Added event listener: {}", name);
    }

    /// 添加函数式监听器
    pub fn add_fn_listener<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&PipelineEvent) + Send + Sync + 'static,
    {
        let listener = Arc::new(FnListener::new(name, handler));
        self.add_listener(listener);
    }

    /// 清除所有监听器
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// 分发事件
    pub fn emit(&self, event: PipelineEvent) {
        let listeners = self.listeners.read();

        tracing::trace!("Emitting event: {}", event.name());

        for listener in listeners.iter() {
            listener.on_event(&event);
        }
    }

    /// 获取监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
