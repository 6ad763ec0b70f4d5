//! Script execution engine
//!
//! Runs JMeter scripts one at a time and tracks batch progress.

mod process;
mod runner;

use std::path::Path;

use crate::models::ScriptRun;

pub use process::ProcessExecutor;
pub use runner::{BatchPlan, BatchRunner};

/// Runs a single script to completion
///
/// Failures are reported in the returned [`ScriptRun`] rather than as errors,
/// so one bad script never stops the batch.
#[allow(async_fn_in_trait)]
pub trait ScriptExecutor {
    async fn execute(&self, script: &Path) -> ScriptRun;

    /// Human-readable form of the invocation for `script`
    fn describe(&self, script: &Path) -> String {
        script.display().to_string()
    }
}
