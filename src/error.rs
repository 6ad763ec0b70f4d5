//! Runner errors
//!
//! Typed conditions that stop a batch before any script runs.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported to the user before the batch starts
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration file not found (searched: {0})")]
    ConfigNotFound(String),

    #[error("JMeter home is not configured (set jmeter.home or JMX_RUNNER_HOME_DIR)")]
    MissingEngineHome,

    #[error("JMeter home does not exist: {0}")]
    EngineHomeNotFound(PathBuf),

    #[error("Environment name must not be empty")]
    MissingEnvironment,

    #[error("Unknown environment: {name} (available: {})", .available.join(", "))]
    UnknownEnvironment {
        name: String,
        available: Vec<String>,
    },

    #[error("No script directory given and no default script directory configured")]
    MissingDirectory,

    #[error("Script directory path must not be empty")]
    EmptyDirectoryArgument,

    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Only batch runs are supported, expected a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Cannot read directory {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No runnable scripts under: {0}")]
    EmptyBatch(PathBuf),
}

impl RunnerError {
    /// Whether the error stems from bad command-line input
    pub fn is_usage(&self) -> bool {
        !matches!(
            self,
            RunnerError::ConfigNotFound(_)
                | RunnerError::MissingEngineHome
                | RunnerError::EngineHomeNotFound(_)
                | RunnerError::Unreadable { .. }
        )
    }
}
