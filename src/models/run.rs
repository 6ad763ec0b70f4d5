//! Run configuration and progress state

use std::path::PathBuf;
use std::time::Duration;

use crate::utils::Timer;

/// Resolved, validated inputs for one batch run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Environment config file name, always `.yaml`-suffixed
    pub environment: String,

    /// Directory the scripts are discovered under
    pub directory: PathBuf,

    /// Optional project label namespacing the report
    pub project: Option<String>,
}

impl RunConfig {
    pub fn new(environment: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            environment: environment.into(),
            directory: directory.into(),
            project: None,
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project.filter(|p| !p.trim().is_empty());
        self
    }
}

/// Progress counters for a running batch
///
/// `total` is fixed at construction; `completed` moves by one per script.
#[derive(Debug)]
pub struct JobProgress {
    total: usize,
    completed: usize,
    timer: Timer,
}

impl JobProgress {
    /// Start tracking a batch of `total` scripts
    pub fn start(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            timer: Timer::start("batch"),
        }
    }

    /// Mark one more script as done, returning the new completed count
    pub fn record(&mut self) -> usize {
        if self.completed < self.total {
            self.completed += 1;
        }
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// Completed share of the batch (0.0 - 1.0)
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// Wall time since the batch started
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}
