//! Data models for batch runs
//!
//! Run configuration, progress accounting, and per-script results.

mod result;
mod run;

pub(crate) use result::script_name;
pub use result::{BatchSummary, ScriptRun, ScriptStatus};
pub use run::{JobProgress, RunConfig};
