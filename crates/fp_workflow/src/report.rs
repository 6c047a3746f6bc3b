// crates/fp_workflow/src/report.rs

//! 运行报告
//!
//! 每次运行记录全部步骤的结果，序列化为 JSON 以便回溯。

use chrono::{DateTime, Utc};
use fp_config::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::step::{RunId, StepStatus};

/// 单步结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// 步骤序号（从 0 开始）
    pub index: usize,
    /// 步骤名称
    pub name: String,
    /// 等价命令
    pub command: String,
    /// 状态
    pub status: StepStatus,
    /// 外部工具退出码
    pub exit_code: Option<i32>,
    /// 耗时 (秒)
    pub duration_secs: f64,
    /// 错误或跳过原因
    pub message: Option<String>,
}

/// 运行报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// 运行ID
    pub id: RunId,
    /// 算例目录
    pub case_dir: PathBuf,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 结束时间
    pub finished_at: Option<DateTime<Utc>>,
    /// 失败策略
    pub policy: ErrorPolicy,
    /// 是否试运行
    pub dry_run: bool,
    /// 各步骤结果，顺序与流程一致
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    /// 创建空报告
    pub fn new(id: RunId, case_dir: impl Into<PathBuf>, policy: ErrorPolicy, dry_run: bool) -> Self {
        Self {
            id,
            case_dir: case_dir.into(),
            started_at: Utc::now(),
            finished_at: None,
            policy,
            dry_run,
            steps: Vec::new(),
        }
    }

    /// 追加步骤结果
    pub fn push(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    /// 标记结束
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// 指定状态的步骤数
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// 成功步数
    pub fn succeeded(&self) -> usize {
        self.count(StepStatus::Succeeded)
    }

    /// 失败步数
    pub fn failed(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    /// 跳过步数
    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    /// 没有失败步骤
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// 第一个失败步骤
    pub fn first_failure(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }

    /// 总耗时 (秒)
    pub fn duration_secs(&self) -> f64 {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}
