//! Workflow recording, stage timing, and structured run artifacts.

use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::error::{XtaskError, XtaskResult};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
struct StageRecord {
    name: String,
    started_at: String,
    duration_ms: u128,
    status: &'static str,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunManifest<'a> {
    workflow: &'a str,
    started_at: &'a str,
    finished_at: String,
    duration_ms: u128,
    status: &'static str,
    error: Option<String>,
    run_dir: String,
    command: &'a str,
    stages: &'a [StageRecord],
}

/// Shared workflow recorder service.
///
/// Multi-stage commands run through [`with_workflow_run`](Self::with_workflow_run) and nest each
/// step in [`WorkflowRun::stage`]. Every run gets its own directory under
/// `.artifacts/automation/runs/` holding an `events.jsonl` stream and a `manifest.json` summary.
#[derive(Clone, Debug)]
pub struct WorkflowRecorder {
    artifacts: ArtifactManager,
}

/// Handle to one in-flight recorded workflow run.
#[derive(Debug)]
pub struct WorkflowRun {
    workflow: String,
    started_at: String,
    started: Instant,
    run_dir: PathBuf,
    events_path: PathBuf,
    command: String,
    stages: Vec<StageRecord>,
}

impl WorkflowRecorder {
    /// Create a recorder service.
    pub fn new(artifacts: ArtifactManager) -> Self {
        Self { artifacts }
    }

    /// Run a workflow with manifest and event recording.
    ///
    /// The action's result is returned unchanged once the `workflow_finished` event and the
    /// manifest have been written.
    pub fn with_workflow_run<F>(&self, workflow: &str, action: F) -> XtaskResult<()>
    where
        F: FnOnce(&mut WorkflowRun) -> XtaskResult<()>,
    {
        let mut run = self.begin(workflow)?;
        let result = action(&mut run);
        run.finish(result.as_ref().err())?;
        result
    }

    /// Print a warning using the shared workflow output style.
    pub fn warn(&self, message: &str) {
        println!("\n[warn] {message}");
    }

    fn begin(&self, workflow: &str) -> XtaskResult<WorkflowRun> {
        let now = Utc::now();
        let run_id = format!("{}-{workflow}", now.timestamp_millis());
        let run_dir = self.artifacts.automation_runs_dir().join(run_id);
        self.artifacts.ensure_dir(&run_dir)?;

        let events_path = run_dir.join("events.jsonl");
        fs::write(&events_path, "").map_err(|err| {
            XtaskError::io(format!(
                "failed to initialize {}: {err}",
                events_path.display()
            ))
        })?;

        let started_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        append_event(
            &events_path,
            json!({
                "type": "workflow_started",
                "workflow": workflow,
                "timestamp": started_at,
            }),
        )?;

        Ok(WorkflowRun {
            workflow: workflow.to_string(),
            started_at,
            started: Instant::now(),
            run_dir,
            events_path,
            command: env::args().collect::<Vec<_>>().join(" "),
            stages: Vec::new(),
        })
    }
}

impl WorkflowRun {
    /// Record a stage with timing and structured events.
    ///
    /// The stage result is propagated to the caller unchanged.
    pub fn stage<F>(&mut self, name: &str, action: F) -> XtaskResult<()>
    where
        F: FnOnce() -> XtaskResult<()>,
    {
        println!("\n==> {name}");
        let started_at = timestamp();
        append_event(
            &self.events_path,
            json!({ "type": "stage_started", "name": name, "timestamp": started_at }),
        )?;

        let started = Instant::now();
        let result = action();
        let elapsed = started.elapsed();
        let stage = StageRecord {
            name: name.to_string(),
            started_at,
            duration_ms: elapsed.as_millis(),
            status: if result.is_ok() { "ok" } else { "failed" },
            error: result.as_ref().err().map(ToString::to_string),
        };

        append_event(
            &self.events_path,
            json!({
                "type": "stage_finished",
                "name": stage.name,
                "timestamp": timestamp(),
                "duration_ms": stage.duration_ms,
                "status": stage.status,
                "error": stage.error,
            }),
        )?;
        let outcome = if result.is_ok() { "done" } else { "failed" };
        println!("    {outcome} in {}", format_duration(elapsed));
        self.stages.push(stage);
        result
    }

    /// Directory holding this run's artifacts.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    fn finish(self, error: Option<&XtaskError>) -> XtaskResult<()> {
        let status = if error.is_none() { "ok" } else { "failed" };
        let finished_at = timestamp();
        append_event(
            &self.events_path,
            json!({
                "type": "workflow_finished",
                "workflow": self.workflow,
                "timestamp": finished_at,
                "status": status,
                "error": error.map(ToString::to_string),
            }),
        )?;

        let manifest = RunManifest {
            workflow: &self.workflow,
            started_at: &self.started_at,
            finished_at,
            duration_ms: self.started.elapsed().as_millis(),
            status,
            error: error.map(ToString::to_string),
            run_dir: self.run_dir.display().to_string(),
            command: &self.command,
            stages: &self.stages,
        };
        let manifest_path = self.run_dir.join("manifest.json");
        let body = serde_json::to_string_pretty(&manifest)
            .map_err(|err| XtaskError::io(format!("failed to serialize run manifest: {err}")))?;
        fs::write(&manifest_path, format!("{body}\n")).map_err(|err| {
            XtaskError::io(format!("failed to write {}: {err}", manifest_path.display()))
        })?;
        println!("    workflow run artifact: {}", manifest_path.display());
        Ok(())
    }
}

fn append_event(path: &Path, event: Value) -> XtaskResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| XtaskError::io(format!("failed to open {}: {err}", path.display())))?;
    let line = serde_json::to_string(&event)
        .map_err(|err| XtaskError::io(format!("failed to serialize run event: {err}")))?;
    writeln!(&mut file, "{line}")
        .map_err(|err| XtaskError::io(format!("failed to append {}: {err}", path.display())))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a duration for human-readable terminal output.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    if secs >= 60 {
        format!("{}m {}.{millis:03}s", secs / 60, secs % 60)
    } else {
        format!("{secs}.{millis:03}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "xtask-workflow-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    fn single_run_dir(artifacts: &ArtifactManager) -> PathBuf {
        let entries = fs::read_dir(artifacts.automation_runs_dir())
            .expect("read run dir")
            .map(|entry| entry.expect("entry").path())
            .collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
        entries[0].clone()
    }

    #[test]
    fn workflow_run_writes_manifest_and_events() {
        let root = unique_temp_root();
        let artifacts = ArtifactManager::new(root.clone());
        let workflow = WorkflowRecorder::new(artifacts.clone());

        workflow
            .with_workflow_run("catalog", |run| run.stage("example stage", || Ok(())))
            .expect("workflow run");

        let run_dir = single_run_dir(&artifacts);
        let manifest = fs::read_to_string(run_dir.join("manifest.json")).expect("manifest");
        let events = fs::read_to_string(run_dir.join("events.jsonl")).expect("events");

        assert!(manifest.contains("\"workflow\": \"catalog\""));
        assert!(manifest.contains("\"status\": \"ok\""));
        assert!(manifest.contains("\"name\": \"example stage\""));
        let kinds: Vec<String> = events
            .lines()
            .map(|line| {
                let event: Value = serde_json::from_str(line).expect("event json");
                event["type"].as_str().expect("type").to_string()
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "workflow_started",
                "stage_started",
                "stage_finished",
                "workflow_finished"
            ]
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn failed_stage_marks_manifest_as_failed_and_stops_the_run() {
        let root = unique_temp_root();
        let artifacts = ArtifactManager::new(root.clone());
        let workflow = WorkflowRecorder::new(artifacts.clone());
        let mut reached_second_stage = false;

        let result = workflow.with_workflow_run("catalog", |run| {
            run.stage("failing stage", || {
                Err(XtaskError::validation("expected failure"))
            })?;
            reached_second_stage = true;
            run.stage("never runs", || Ok(()))
        });
        assert!(result.is_err());
        assert!(!reached_second_stage);

        let manifest =
            fs::read_to_string(single_run_dir(&artifacts).join("manifest.json")).expect("manifest");
        assert!(manifest.contains("\"status\": \"failed\""));
        assert!(manifest.contains("expected failure"));
        assert!(!manifest.contains("never runs"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn format_duration_switches_to_minutes() {
        assert_eq!(format_duration(Duration::from_millis(1_250)), "1.250s");
        assert_eq!(format_duration(Duration::from_millis(61_005)), "1m 1.005s");
    }
}
