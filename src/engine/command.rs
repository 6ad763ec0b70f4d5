//! JMeter invocation builder
//!
//! Builds an argument vector for non-GUI runs. Paths are passed as separate
//! arguments and never interpolated into a shell string.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{EngineLayout, ReportName};

/// One non-GUI JMeter invocation
#[derive(Clone, Debug)]
pub struct EngineCommand {
    executable: PathBuf,
    working_dir: PathBuf,
    log_file: PathBuf,
    environment: String,
    report: String,
    append: bool,
    script: PathBuf,
}

impl EngineCommand {
    /// Invocation of `script` with paths taken from `layout`
    pub fn new(
        layout: &EngineLayout,
        environment: impl Into<String>,
        report: &ReportName,
        script: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable: layout.executable(),
            working_dir: layout.bin_dir(),
            log_file: layout.log_file(),
            environment: environment.into(),
            report: report.relative().to_string_lossy().into_owned(),
            append: true,
            script: script.into(),
        }
    }

    /// Toggle the report append property
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Arguments after the executable
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-n".into(), "-j".into(), self.log_file.clone().into()];
        args.push(format!("-JconfigName={}", self.environment).into());
        args.push(format!("-JreportName={}", self.report).into());
        args.push(format!("-JisAppend={}", self.append).into());
        args.push("-t".into());
        args.push(self.script.clone().into());
        args
    }

    /// Command line for display, each argument quoted when it contains spaces
    pub fn display(&self) -> String {
        std::iter::once(self.executable.clone().into_os_string())
            .chain(self.args())
            .map(|arg| {
                let arg = arg.to_string_lossy().into_owned();
                if arg.contains(char::is_whitespace) {
                    format!("\"{arg}\"")
                } else {
                    arg
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Child process working in `<home>/bin`, with no stdin
    ///
    /// Output streams are left for the caller to wire up.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(self.args())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}
