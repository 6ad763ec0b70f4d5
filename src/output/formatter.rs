//! Progress and summary formatters
//!
//! Text output mirrors the `Label: [ value ]` layout of the console log;
//! JSON output only changes how the final summary is rendered.

use std::path::{Path, PathBuf};

use crate::models::{BatchSummary, JobProgress, ScriptRun, ScriptStatus};
use crate::utils::{decimal_to_percentage, seconds_to_hms};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Formats batch progress for the console
#[derive(Clone, Debug)]
pub struct ProgressFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ProgressFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Banner printed once the batch is known
    pub fn banner(
        &self,
        started_at: &str,
        home: &Path,
        directory: &Path,
        scripts: &[PathBuf],
    ) -> String {
        let mut output = String::new();
        output.push_str(&field("Start time", started_at));
        output.push_str(&field("JMeter home", home.display()));
        output.push_str(&field("Directory", directory.display()));
        output.push_str(&field("Script total", scripts.len()));
        output.push_str("Scripts:\n");
        for (index, script) in scripts.iter().enumerate() {
            output.push_str(&format!("    {}. {}\n", index + 1, script.display()));
        }
        output
    }

    /// Header printed before a script starts
    pub fn script_start(&self, index: usize, total: usize, name: &str, command: &str) -> String {
        format!("\n[{index}/{total}] Running script: [ {name} ]\nCommand: [ {command} ]\n")
    }

    /// Block printed after a script finishes
    pub fn script_progress(&self, run: &ScriptRun, progress: &JobProgress) -> String {
        let mut output = String::new();
        output.push_str(&self.status_line(run));
        output.push('\n');
        output.push_str(&field("Elapsed", seconds_to_hms(run.duration_secs)));
        output.push_str(&field("Completed", progress.completed()));
        output.push_str(&field("Remaining", progress.remaining()));
        output.push_str(&field("Progress", decimal_to_percentage(progress.fraction())));
        output
    }

    /// Final summary of the batch
    pub fn summary(&self, summary: &BatchSummary) -> String {
        match self.format {
            OutputFormat::Text => self.summary_text(summary),
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
        }
    }

    fn summary_text(&self, summary: &BatchSummary) -> String {
        let mut output = String::from("\n");
        output.push_str(&field("Total elapsed", seconds_to_hms(summary.duration_secs)));
        output.push_str(&field(
            "Passed",
            format!("{}/{}", summary.passed, summary.total),
        ));

        if !summary.all_passed() {
            output.push_str(&self.paint(
                &format!("Failed scripts ({}/{}):", summary.failed, summary.total),
                "31",
            ));
            output.push('\n');
            for run in summary.failures() {
                output.push_str(&format!("    {}\n", self.status_line(run)));
            }
        }

        output.push_str(&format!(
            "All scripts finished, see the report: [ {} ]",
            summary.report_path.display()
        ));
        output
    }

    fn status_line(&self, run: &ScriptRun) -> String {
        let color = match run.status {
            ScriptStatus::Passed => "32",
            ScriptStatus::Failed => "31",
        };
        self.paint(&run.to_string(), color)
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colorize {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<14}[ {} ]\n", format!("{label}:"), value)
}
