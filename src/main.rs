//! jmx-runner - Sequential JMeter batch runner
//!
//! Runs every JMeter test plan under a directory in non-GUI mode, one script
//! at a time, appending all results to a single HTML report.
//!
//! ## Features
//!
//! - Recursive `.jmx` discovery with a `skip` file-name convention
//! - Filtered, real-time relay of JMeter console output
//! - Per-script and total timing with progress percentages
//! - Failure summary and non-zero exit status when any script fails
//!
//! ## Usage
//!
//! ```bash
//! # Run all scripts under the configured default directory
//! jmx-runner -e dev
//!
//! # Run a directory and file the report under a project
//! jmx-runner -e test.yaml -d ./plans -p shop
//!
//! # Show what would run
//! jmx-runner -e dev -d ./plans --dry-run
//!
//! # List available environments
//! jmx-runner --list-environments
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::debug;

mod cli;
mod config;
mod discovery;
mod engine;
mod error;
mod executor;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{ConfigFile, EnvConfig};
use engine::EngineLayout;
use error::RunnerError;
use executor::{BatchPlan, BatchRunner, ProcessExecutor};
use models::RunConfig;
use output::{OutputFormat, ProgressFormatter};
use utils::logger::{init_logger, LogLevel};

/// Exit status for usage errors, matching clap's
const USAGE_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&args.log_level).unwrap_or(LogLevel::Warn)
    };
    init_logger(level);

    match run(args).await {
        Ok(code) => Ok(code),
        Err(e) => match e.downcast_ref::<RunnerError>() {
            Some(runner_error) if runner_error.is_usage() => {
                eprintln!("error: {runner_error}\n");
                eprintln!("{}", Args::command().render_usage());
                Ok(ExitCode::from(USAGE_EXIT))
            }
            _ => Err(e),
        },
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let env = EnvConfig::load();
    if env.has_any() {
        debug!("Environment overrides: {:?}", env);
    }

    let resolved = ConfigFile::resolve(args.config.as_deref(), &env)?;
    if let Some(source) = &resolved.source {
        debug!("Using configuration {}", source.display());
    }

    if args.print_config {
        print!("{}", serde_yaml::to_string(&resolved.config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let layout = EngineLayout::new(resolved.config.jmeter_home()?)?;

    if args.list_environments {
        println!("Environments in {}:", layout.config_dir().display());
        for name in layout.environments()? {
            println!("  - {}", name.trim_end_matches(".yaml"));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let environment = layout.resolve_environment(args.environment.as_deref().unwrap_or_default())?;
    let directory = resolved.config.script_directory(args.directory)?;
    let run_config = RunConfig::new(environment, directory).with_project(args.project.or(env.project));

    let plan = BatchPlan::prepare(&layout, run_config)?;

    let format = OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Text);
    let mut formatter = ProgressFormatter::new(format);
    if !std::io::stdout().is_terminal() {
        formatter = formatter.no_color();
    }

    let executor = ProcessExecutor::new(layout, &plan);
    let runner = BatchRunner::new(executor, formatter);

    if args.dry_run {
        runner.preview(&plan);
        return Ok(ExitCode::SUCCESS);
    }

    let summary = runner.run(&plan).await;

    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
