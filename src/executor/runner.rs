//! Batch runner
//!
//! Executes a discovered batch strictly one script at a time. Every script
//! appends to the same JMeter report, which is only safe with a single
//! writer, so nothing here runs concurrently.

use chrono::Local;
use std::path::PathBuf;
use tracing::{info, warn};

use super::ScriptExecutor;
use crate::discovery;
use crate::engine::{EngineLayout, ReportName};
use crate::error::RunnerError;
use crate::models::{script_name, BatchSummary, JobProgress, RunConfig};
use crate::output::ProgressFormatter;
use crate::utils::{current_strftime, Timer};

/// A validated batch, ready to execute
#[derive(Clone, Debug)]
pub struct BatchPlan {
    pub config: RunConfig,
    /// JMeter home shown in the banner
    pub home: PathBuf,
    /// Scripts in execution order, skip filter applied
    pub scripts: Vec<PathBuf>,
    /// Report every script of the run appends to
    pub report: ReportName,
    /// Where the report ends up
    pub report_path: PathBuf,
}

impl BatchPlan {
    /// Discover and filter scripts, and name the report for this run
    pub fn prepare(layout: &EngineLayout, config: RunConfig) -> Result<Self, RunnerError> {
        let scripts = discovery::collect_batch(&config.directory)?;
        let report = ReportName::generate(config.project.as_deref());
        let report_path = report.path_under(&layout.report_dir());

        Ok(Self {
            config,
            home: layout.home().to_path_buf(),
            scripts,
            report,
            report_path,
        })
    }

    pub fn total(&self) -> usize {
        self.scripts.len()
    }
}

/// Sequential batch runner
pub struct BatchRunner<E> {
    executor: E,
    formatter: ProgressFormatter,
}

impl<E: ScriptExecutor> BatchRunner<E> {
    pub fn new(executor: E, formatter: ProgressFormatter) -> Self {
        Self {
            executor,
            formatter,
        }
    }

    /// Print the banner without executing anything
    pub fn preview(&self, plan: &BatchPlan) {
        self.print_banner(plan);
        for script in &plan.scripts {
            println!("{}", self.executor.describe(script));
        }
        info!("Dry run: {} scripts not executed", plan.total());
    }

    /// Run every script in the plan and summarise the batch
    ///
    /// A failing script is recorded and the batch moves on to the next one.
    pub async fn run(&self, plan: &BatchPlan) -> BatchSummary {
        let started_at = Local::now();
        self.print_banner(plan);

        let total = plan.total();
        let mut progress = JobProgress::start(total);
        let mut results = Vec::with_capacity(total);

        info!(
            "Running {} scripts against environment {}, report {}",
            total,
            plan.config.environment,
            plan.report.file_name()
        );

        for (index, script) in plan.scripts.iter().enumerate() {
            let name = script_name(script);
            println!(
                "{}",
                self.formatter.script_start(
                    index + 1,
                    total,
                    &name,
                    &self.executor.describe(script)
                )
            );

            let timer = Timer::start(name);
            let run = self.executor.execute(script).await;
            let run = run.with_duration(timer.stop());

            progress.record();
            println!("{}", self.formatter.script_progress(&run, &progress));
            results.push(run);
        }

        debug_assert_eq!(progress.completed(), progress.total());

        let summary = BatchSummary::new(
            plan.config.environment.as_str(),
            plan.config.directory.as_path(),
            plan.report_path.as_path(),
            started_at,
            results,
            progress.elapsed(),
        )
        .with_project(plan.report.project());

        println!("{}", self.formatter.summary(&summary));

        if summary.all_passed() {
            info!("Batch finished: {} scripts passed", summary.passed);
        } else {
            warn!(
                "Batch finished: {} of {} scripts failed",
                summary.failed, summary.total
            );
        }

        summary
    }

    fn print_banner(&self, plan: &BatchPlan) {
        println!(
            "{}",
            self.formatter.banner(
                &current_strftime(),
                &plan.home,
                &plan.config.directory,
                &plan.scripts
            )
        );
    }
}
