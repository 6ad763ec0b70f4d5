//! Shared helpers
//!
//! Formatting, timing, and logging setup.

pub mod format;
pub mod logger;
pub mod timer;

pub use format::{current_strftime, decimal_to_percentage, seconds_to_hms};
pub use timer::Timer;
