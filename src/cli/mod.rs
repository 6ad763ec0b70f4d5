//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::env::ENV_HELP;

/// Sequential JMeter batch runner
#[derive(Parser, Debug)]
#[command(name = "jmx-runner")]
#[command(author = "hephaex@gmail.com")]
#[command(version)]
#[command(about = "Run every JMeter script under a directory, one after another")]
#[command(after_help = ENV_HELP)]
pub struct Args {
    /// Environment config name under <jmeter home>/config (".yaml" may be omitted)
    #[arg(
        short,
        long,
        required_unless_present_any = ["list_environments", "print_config"]
    )]
    pub environment: Option<String>,

    /// Directory of .jmx scripts (defaults to default.script_directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Project label, stores the report under htmlreport/<project>/
    #[arg(short, long)]
    pub project: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Summary format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Show the batch and the JMeter commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// List available environments and exit
    #[arg(long)]
    pub list_environments: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
