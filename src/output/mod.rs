//! Output formatting module
//!
//! Renders the run banner, per-script progress, and the final summary.

mod formatter;

pub use formatter::{OutputFormat, ProgressFormatter};
