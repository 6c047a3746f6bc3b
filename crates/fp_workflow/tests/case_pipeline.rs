//! 算例准备流程测试
//!
//! 在临时算例目录中运行标准流程，外部工具由记录调用的执行器代替。

use std::path::PathBuf;
use std::sync::Arc;

use fp_config::{CaseConfig, ErrorPolicy, OutputMode};
use fp_workflow::{
    Pipeline, PipelineEvent, PipelineRunner, RunnerConfig, StepStatus, ToolExecutor,
    ToolInvocation, ToolOutput, WorkflowError,
};
use parking_lot::Mutex;

/// 记录调用的执行器
///
/// 调用 blockMesh 时检查旧网格是否已被删除，并写出新的网格文件。
#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<String>>,
    stale_mesh_seen: Mutex<bool>,
}

impl ToolExecutor for RecordingExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput, WorkflowError> {
        let mut line = invocation.program.clone();
        for arg in &invocation.args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().push(line);

        if invocation.program == "blockMesh" {
            let mesh = invocation.working_dir.join("constant/polyMesh");
            if mesh.join("stale").exists() {
                *self.stale_mesh_seen.lock() = true;
            }
            std::fs::create_dir_all(&mesh)?;
            std::fs::write(mesh.join("points"), "()")?;
        }
        Ok(ToolOutput::ok())
    }
}

struct Case {
    _dir: tempfile::TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

fn create_case() -> Case {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let template = root.join("0.orig");
    std::fs::create_dir_all(&template).unwrap();
    std::fs::write(template.join("boundaryT"), "uniform 300").unwrap();
    std::fs::write(template.join("boundaryU"), "uniform (0 0 0)").unwrap();

    let config_path = root.join("case.json");
    std::fs::write(&config_path, r#"{ "mesh": { "radial_cells": 4 } }"#).unwrap();

    Case {
        _dir: dir,
        root,
        config_path,
    }
}

fn standard(case: &Case) -> Pipeline {
    let config = CaseConfig::from_file(&case.config_path).unwrap_or_default();
    Pipeline::standard(&config, &case.root, &case.config_path, None)
}

#[test]
fn prepares_case_and_invokes_tools_in_order() {
    let case = create_case();
    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default());

    let report = runner.run(&standard(&case));

    assert!(report.is_success(), "{:?}", report.first_failure());
    assert_eq!(report.succeeded(), 7);
    assert_eq!(
        *runner.executor().calls.lock(),
        ["blockMesh", "snappyHexMesh -overwrite", "dsmcInitialise"]
    );

    let dict = std::fs::read_to_string(case.root.join("system/blockMeshDict")).unwrap();
    assert!(dict.contains("(4 6 20)"));
    assert!(case.root.join("0/boundaryT").is_file());
    assert!(case.root.join("0/boundaryU").is_file());
    assert!(case.root.join("constant/polyMesh/points").is_file());
}

#[test]
fn rerun_removes_previous_mesh_before_block_mesh() {
    let case = create_case();
    let mesh = case.root.join("constant/polyMesh");
    std::fs::create_dir_all(&mesh).unwrap();
    std::fs::write(mesh.join("stale"), "old").unwrap();

    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default());
    let report = runner.run(&standard(&case));

    assert!(report.is_success());
    assert!(!*runner.executor().stale_mesh_seen.lock());
    assert!(!mesh.join("stale").exists());
}

#[test]
fn missing_config_fails_first_step_and_continues() {
    let case = create_case();
    std::fs::remove_file(&case.config_path).unwrap();

    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default());
    let report = runner.run(&standard(&case));

    assert_eq!(report.steps[0].status, StepStatus::Failed);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 6);
    assert_eq!(runner.executor().calls.lock().len(), 3);
    assert!(!case.root.join("system/blockMeshDict").exists());
}

#[test]
fn missing_config_with_halt_policy_skips_remaining_steps() {
    let case = create_case();
    std::fs::remove_file(&case.config_path).unwrap();

    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default()).with_config(
        RunnerConfig {
            policy: ErrorPolicy::Halt,
            ..Default::default()
        },
    );
    let report = runner.run(&standard(&case));

    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped(), 6);
    assert!(runner.executor().calls.lock().is_empty());
    assert!(!case.root.join("0").exists());
}

#[test]
fn missing_template_is_reported_on_copy_step() {
    let case = create_case();
    std::fs::remove_dir_all(case.root.join("0.orig")).unwrap();

    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default());
    let report = runner.run(&standard(&case));

    let failure = report.first_failure().unwrap();
    assert_eq!(failure.name, "copyTemplate");
    assert!(failure.message.as_deref().unwrap().contains("0.orig"));
    assert_eq!(runner.executor().calls.lock().last().map(String::as_str), Some("dsmcInitialise"));
}

#[test]
fn emits_events_for_every_step() {
    let case = create_case();
    let runner = PipelineRunner::new(&case.root, RecordingExecutor::default());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    runner.events().add_fn_listener("collect", move |event: &PipelineEvent| {
        sink.lock().push(event.name());
    });

    runner.run(&standard(&case));

    let seen = seen.lock();
    assert_eq!(seen.first(), Some(&"RunStarted"));
    assert_eq!(seen.last(), Some(&"RunFinished"));
    assert_eq!(seen.iter().filter(|n| **n == "StepStarted").count(), 7);
    assert_eq!(seen.iter().filter(|n| **n == "StepCompleted").count(), 7);
}

#[cfg(unix)]
#[test]
fn runs_real_processes_with_log_capture() {
    use fp_workflow::ProcessExecutor;

    let case = create_case();
    let mut config = CaseConfig::from_file(&case.config_path).unwrap();
    config.pipeline.tools.block_mesh = "true".to_string();
    config.pipeline.tools.snappy_hex_mesh = "true".to_string();
    config.pipeline.tools.dsmc_initialise = "false".to_string();

    let pipeline = Pipeline::standard(&config, &case.root, &case.config_path, None);
    let runner = PipelineRunner::new(&case.root, ProcessExecutor::new()).with_config(RunnerConfig {
        output: OutputMode::LogFile,
        ..Default::default()
    });
    let report = runner.run(&pipeline);

    let last = report.steps.last().unwrap();
    assert_eq!(last.status, StepStatus::Failed);
    assert_eq!(last.exit_code, Some(1));
    assert_eq!(report.failed(), 1);
    assert!(case.root.join("log.true").is_file());
}
