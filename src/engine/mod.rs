//! JMeter engine integration
//!
//! Install layout, report naming, invocation building, and output filtering.

mod command;
mod filter;
mod layout;
mod report;

pub use command::EngineCommand;
pub use filter::{NoiseFilter, OutputFilter};
pub use layout::EngineLayout;
pub use report::ReportName;
