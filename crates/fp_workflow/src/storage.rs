// crates/fp_workflow/src/storage.rs

//! 存储后端模块
//!
//! 提供运行报告持久化存储的抽象和实现。

use crate::report::RunReport;
use crate::step::RunId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 报告目录（相对算例目录）
pub const REPORT_DIR: &str = ".foamprep/runs";

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// 存储后端trait
pub trait Storage: Send + Sync {
    /// 保存报告
    fn save_report(&self, report: &RunReport) -> Result<(), StorageError>;

    /// 加载报告
    fn load_report(&self, id: RunId) -> Result<Option<RunReport>, StorageError>;

    /// 列出所有报告，按开始时间升序
    fn list_reports(&self) -> Result<Vec<RunReport>, StorageError>;

    /// 检查报告是否存在
    fn contains(&self, id: RunId) -> Result<bool, StorageError> {
        Ok(self.load_report(id)?.is_some())
    }

    /// 最近一次运行
    fn latest(&self) -> Result<Option<RunReport>, StorageError> {
        Ok(self.list_reports()?.pop())
    }
}

fn sort_by_start(mut reports: Vec<RunReport>) -> Vec<RunReport> {
    reports.sort_by_key(|r| r.started_at);
    reports
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStorage {
    reports: RwLock<HashMap<RunId, RunReport>>,
}

impl MemoryStorage {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取当前报告数量
    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.reports.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn save_report(&self, report: &RunReport) -> Result<(), StorageError> {
        self.reports.write().insert(report.id, report.clone());
        Ok(())
    }

    fn load_report(&self, id: RunId) -> Result<Option<RunReport>, StorageError> {
        Ok(self.reports.read().get(&id).cloned())
    }

    fn list_reports(&self) -> Result<Vec<RunReport>, StorageError> {
        Ok(sort_by_start(self.reports.read().values().cloned().collect()))
    }
}

/// 文件存储
///
/// 每次运行一个 `<run_id>.json`。
#[derive(Debug)]
pub struct FileStorage {
    /// 存储目录
    dir: PathBuf,
}

impl FileStorage {
    /// 创建新的文件存储
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// 算例目录下的缺省存储
    pub fn for_case(case_dir: &Path) -> Result<Self, StorageError> {
        Self::new(case_dir.join(REPORT_DIR))
    }

    /// 打开已有的存储目录，不创建；目录不存在时返回 `None`
    pub fn open_existing(dir: impl Into<PathBuf>) -> Option<Self> {
        let dir = dir.into();
        dir.is_dir().then_some(Self { dir })
    }

    /// 获取报告文件路径
    fn report_path(&self, id: RunId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// 从文件加载报告
    fn load_from_file(&self, path: &Path) -> Result<RunReport, StorageError> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// 获取存储目录
    pub fn directory(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn save_report(&self, report: &RunReport) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        std::fs::write(self.report_path(report.id), json)?;
        Ok(())
    }

    fn load_report(&self, id: RunId) -> Result<Option<RunReport>, StorageError> {
        let path = self.report_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.load_from_file(&path)?))
    }

    fn list_reports(&self) -> Result<Vec<RunReport>, StorageError> {
        let mut reports = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                match self.load_from_file(&path) {
                    Ok(report) => reports.push(report),
                    Err(e) => tracing::warn!("Ignoring unreadable report {}: {}", path.display(), e),
                }
            }
        }

        Ok(sort_by_start(reports))
    }
}
