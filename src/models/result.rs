//! Script and batch results

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one JMeter invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    Passed,
    Failed,
}

impl ScriptStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ScriptStatus::Passed => "✓",
            ScriptStatus::Failed => "✗",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScriptStatus::Passed)
    }
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptStatus::Passed => write!(f, "PASSED"),
            ScriptStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Result of running a single script
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptRun {
    pub script: PathBuf,
    pub status: ScriptStatus,
    /// Exit code, absent when the process never started or was killed by a signal
    pub exit_code: Option<i32>,
    /// Lines passed through the noise filter
    pub relayed_lines: usize,
    pub duration_secs: u64,
    pub message: Option<String>,
}

impl ScriptRun {
    pub fn passed(script: impl Into<PathBuf>, relayed_lines: usize) -> Self {
        Self {
            script: script.into(),
            status: ScriptStatus::Passed,
            exit_code: Some(0),
            relayed_lines,
            duration_secs: 0,
            message: None,
        }
    }

    pub fn failed(
        script: impl Into<PathBuf>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            status: ScriptStatus::Failed,
            exit_code,
            relayed_lines: 0,
            duration_secs: 0,
            message: Some(message.into()),
        }
    }

    pub fn with_relayed_lines(mut self, relayed_lines: usize) -> Self {
        self.relayed_lines = relayed_lines;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_secs = duration.as_secs();
        self
    }

    /// File name of the script, falling back to the full path
    pub fn script_name(&self) -> String {
        script_name(&self.script)
    }
}

impl fmt::Display for ScriptRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.status.symbol(), self.script_name(), self.status)?;
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

/// Summary of a completed batch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub directory: PathBuf,
    pub report_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_secs: u64,
    pub results: Vec<ScriptRun>,
}

impl BatchSummary {
    pub fn new(
        environment: impl Into<String>,
        directory: impl Into<PathBuf>,
        report_path: impl Into<PathBuf>,
        started_at: DateTime<Local>,
        results: Vec<ScriptRun>,
        duration: Duration,
    ) -> Self {
        let passed = results.iter().filter(|r| r.status.is_success()).count();
        let failed = results.len() - passed;

        Self {
            environment: environment.into(),
            project: None,
            directory: directory.into(),
            report_path: report_path.into(),
            started_at,
            total: results.len(),
            passed,
            failed,
            duration_secs: duration.as_secs(),
            results,
        }
    }

    pub fn with_project(mut self, project: Option<&str>) -> Self {
        self.project = project.map(str::to_string);
        self
    }

    /// Scripts whose JMeter run did not succeed
    pub fn failures(&self) -> impl Iterator<Item = &ScriptRun> {
        self.results.iter().filter(|r| !r.status.is_success())
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

pub(crate) fn script_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
