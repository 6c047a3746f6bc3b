// crates/fp_workflow/src/step.rs

//! 步骤定义模块
//!
//! 定义流程步骤的数据结构和状态。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 运行ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// 创建新的运行ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 获取内部UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// 成功
    Succeeded,
    /// 失败
    Failed,
    /// 跳过（试运行或前序失败后停止）
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
        };
        write!(f, "{}", s)
    }
}

/// 步骤操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepKind {
    /// 读取配置文件并生成 blockMeshDict
    GenerateMeshDict {
        /// 配置文件
        config: PathBuf,
        /// blockMeshDict 路径
        output: PathBuf,
    },
    /// 递归删除目录
    RemoveDir {
        /// 目标目录
        path: PathBuf,
    },
    /// 调用外部工具
    RunTool {
        /// 可执行文件
        program: String,
        /// 参数
        args: Vec<String>,
    },
    /// 创建目录
    CreateDir {
        /// 目标目录
        path: PathBuf,
    },
    /// 复制模板目录内容
    CopyDirContents {
        /// 模板目录
        from: PathBuf,
        /// 目标目录
        to: PathBuf,
    },
}

impl StepKind {
    /// 等价的 shell 命令，用于日志与计划输出
    pub fn command_line(&self) -> String {
        match self {
            Self::GenerateMeshDict { config, output } => {
                format!("foamprep mesh -c {} -o {}", config.display(), output.display())
            }
            Self::RemoveDir { path } => format!("rm -rf {}", path.display()),
            Self::RunTool { program, args } => {
                if args.is_empty() {
                    program.clone()
                } else {
                    format!("{} {}", program, args.join(" "))
                }
            }
            Self::CreateDir { path } => format!("mkdir -p {}", path.display()),
            Self::CopyDirContents { from, to } => {
                format!("cp -r {}/. {}", from.display(), to.display())
            }
        }
    }
}

/// 流程步骤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 步骤名称
    pub name: String,
    /// 操作
    pub kind: StepKind,
}

impl Step {
    /// 创建步骤
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// 外部工具步骤，名称取程序名
    pub fn tool(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        Self::new(program.clone(), StepKind::RunTool { program, args })
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind.command_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_roundtrip_string() {
        let id = RunId::new();
        let parsed: RunId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_command_lines() {
        let tool = Step::tool("snappyHexMesh", vec!["-overwrite".to_string()]);
        assert_eq!(tool.name, "snappyHexMesh");
        assert_eq!(tool.kind.command_line(), "snappyHexMesh -overwrite");

        let plain = Step::tool("blockMesh", Vec::new());
        assert_eq!(plain.kind.command_line(), "blockMesh");

        let rm = StepKind::RemoveDir {
            path: PathBuf::from("constant/polyMesh"),
        };
        assert_eq!(rm.command_line(), "rm -rf constant/polyMesh");

        let cp = StepKind::CopyDirContents {
            from: PathBuf::from("0.orig"),
            to: PathBuf::from("0"),
        };
        assert_eq!(cp.command_line(), "cp -r 0.orig/. 0");
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&StepStatus::Skipped).unwrap(), "\"skipped\"");
    }
}
