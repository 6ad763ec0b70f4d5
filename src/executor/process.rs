//! JMeter child process execution

use std::io::{self, BufRead, BufReader, PipeReader, Read};
use std::path::Path;
use std::sync::Arc;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, warn};

use super::{BatchPlan, ScriptExecutor};
use crate::engine::{EngineCommand, EngineLayout, NoiseFilter, OutputFilter, ReportName};
use crate::models::ScriptRun;

/// Receives relayed console lines
pub type LineSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Executes scripts by spawning JMeter in non-GUI mode
pub struct ProcessExecutor<F = NoiseFilter> {
    layout: EngineLayout,
    environment: String,
    report: ReportName,
    filter: F,
    sink: LineSink,
}

impl ProcessExecutor<NoiseFilter> {
    /// Executor for `plan`, printing filtered output to stdout
    pub fn new(layout: EngineLayout, plan: &BatchPlan) -> Self {
        Self {
            layout,
            environment: plan.config.environment.clone(),
            report: plan.report.clone(),
            filter: NoiseFilter::default(),
            sink: Arc::new(|line: &str| println!("{line}")),
        }
    }
}

impl<F: OutputFilter> ProcessExecutor<F> {
    /// Replace the output filter
    pub fn with_filter<G: OutputFilter>(self, filter: G) -> ProcessExecutor<G> {
        ProcessExecutor {
            layout: self.layout,
            environment: self.environment,
            report: self.report,
            filter,
            sink: self.sink,
        }
    }

    /// Send relayed lines somewhere other than stdout
    pub fn with_sink(mut self, sink: LineSink) -> Self {
        self.sink = sink;
        self
    }

    fn command_for(&self, script: &Path) -> EngineCommand {
        EngineCommand::new(&self.layout, self.environment.as_str(), &self.report, script)
    }
}

impl<F: OutputFilter> ScriptExecutor for ProcessExecutor<F> {
    async fn execute(&self, script: &Path) -> ScriptRun {
        let command = self.command_for(script);
        debug!(
            "Spawning {} with {:?}",
            command.executable().display(),
            command.args()
        );

        let (mut child, output) = match spawn_with_combined_output(command.to_command()) {
            Ok(spawned) => spawned,
            Err(e) => {
                warn!("Failed to start JMeter for {}: {}", script.display(), e);
                return ScriptRun::failed(
                    script,
                    None,
                    format!("failed to start {}: {e}", command.executable().display()),
                );
            }
        };

        let relayed = match relay_output(output, &self.filter, self.sink.as_ref()).await {
            Ok(relayed) => relayed,
            Err(e) => {
                warn!("Lost JMeter output for {}: {}", script.display(), e);
                let _ = child.kill().await;
                return ScriptRun::failed(script, None, format!("failed to read output: {e}"));
            }
        };

        match child.wait().await {
            Ok(status) if status.success() => ScriptRun::passed(script, relayed),
            Ok(status) => {
                let message = match status.code() {
                    Some(code) => format!("exit code {code}"),
                    None => "terminated by signal".to_string(),
                };
                warn!("Script {} failed: {}", script.display(), message);
                ScriptRun::failed(script, status.code(), message).with_relayed_lines(relayed)
            }
            Err(e) => {
                warn!("Failed to wait for JMeter on {}: {}", script.display(), e);
                ScriptRun::failed(script, None, format!("failed to wait for process: {e}"))
                    .with_relayed_lines(relayed)
            }
        }
    }

    fn describe(&self, script: &Path) -> String {
        self.command_for(script).display()
    }
}

/// Spawn `command` with stdout and stderr sharing one pipe
///
/// Both streams write into the same pipe, so the returned reader sees lines in
/// the order the child wrote them.
pub fn spawn_with_combined_output(mut command: Command) -> io::Result<(Child, PipeReader)> {
    let (reader, writer) = io::pipe()?;
    command.stdout(writer.try_clone()?).stderr(writer);
    let child = command.spawn()?;
    // The command still owns both write ends; the reader only sees EOF once they are gone
    drop(command);
    Ok((child, reader))
}

/// Read an output stream line by line as it arrives, passing the lines that
/// survive `filter` to `sink`
///
/// Lines are trimmed before filtering; invalid UTF-8 is replaced rather than
/// treated as an error. Returns the number of relayed lines.
pub async fn relay_output<R, F, S>(output: R, filter: &F, mut sink: S) -> io::Result<usize>
where
    R: Read + Send + 'static,
    F: OutputFilter + ?Sized,
    S: FnMut(&str),
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let pump = task::spawn_blocking(move || {
        for segment in BufReader::new(output).split(b'\n') {
            let failed = segment.is_err();
            if tx.send(segment).is_err() || failed {
                break;
            }
        }
    });

    let mut relayed = 0;
    while let Some(segment) = rx.recv().await {
        let segment = segment?;
        let line = String::from_utf8_lossy(&segment);
        let line = line.trim();
        if filter.relay(line) {
            sink(line);
            relayed += 1;
        }
    }

    pump.await.map_err(io::Error::other)?;
    Ok(relayed)
}
