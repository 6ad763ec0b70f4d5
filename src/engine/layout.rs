//! JMeter installation layout

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunnerError;

/// Suffix of environment config files under `<home>/config`
const ENVIRONMENT_SUFFIX: &str = ".yaml";

/// Paths derived from a JMeter home directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineLayout {
    home: PathBuf,
}

impl EngineLayout {
    /// Resolve the layout, making the home absolute
    pub fn new(home: impl AsRef<Path>) -> Result<Self> {
        let home = home.as_ref();
        if !home.is_dir() {
            return Err(RunnerError::EngineHomeNotFound(home.to_path_buf()).into());
        }

        let home = home
            .canonicalize()
            .with_context(|| format!("Failed to resolve JMeter home: {}", home.display()))?;

        Ok(Self { home })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `<home>/bin`, the working directory for JMeter
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }

    /// The JMeter launcher script
    pub fn executable(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("jmeter.bat")
        } else {
            self.bin_dir().join("jmeter")
        }
    }

    /// `<home>/bin/jmeter.log`
    pub fn log_file(&self) -> PathBuf {
        self.bin_dir().join("jmeter.log")
    }

    /// `<home>/config`, holding one YAML file per environment
    pub fn config_dir(&self) -> PathBuf {
        self.home.join("config")
    }

    /// `<home>/htmlreport`, where reports are written
    pub fn report_dir(&self) -> PathBuf {
        self.home.join("htmlreport")
    }

    /// Environment file names available under the config directory, sorted
    pub fn environments(&self) -> Result<Vec<String>> {
        let dir = self.config_dir();
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read environment directory: {}", dir.display()))?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(ENVIRONMENT_SUFFIX))
            .collect();
        names.sort();

        Ok(names)
    }

    /// Normalise an environment name and check it exists
    pub fn resolve_environment(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RunnerError::MissingEnvironment.into());
        }

        let name = if name.ends_with(ENVIRONMENT_SUFFIX) {
            name.to_string()
        } else {
            format!("{name}{ENVIRONMENT_SUFFIX}")
        };

        let available = self.environments()?;
        if !available.contains(&name) {
            return Err(RunnerError::UnknownEnvironment { name, available }.into());
        }

        Ok(name)
    }
}
