//! Configuration module
//!
//! Handles loading and managing configuration.

pub mod env;
mod file;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RunnerError;

pub use env::EnvConfig;
pub use file::ConfigFile;

/// Application configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JMeter installation settings
    #[serde(default)]
    pub jmeter: JmeterConfig,

    /// Defaults applied when a flag is omitted
    #[serde(default)]
    pub default: DefaultConfig,
}

/// JMeter installation settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JmeterConfig {
    /// JMeter home directory (contains `bin/`, `config/`, `htmlreport/`)
    pub home: Option<PathBuf>,
}

/// Fallback values for command-line flags
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Script directory used when `--directory` is omitted
    pub script_directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(home) = &env.home_dir {
            self.jmeter.home = Some(PathBuf::from(home));
        }
        if let Some(directory) = &env.directory {
            self.default.script_directory = Some(PathBuf::from(directory));
        }
    }

    /// Configured JMeter home
    pub fn jmeter_home(&self) -> Result<&Path, RunnerError> {
        self.jmeter
            .home
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(RunnerError::MissingEngineHome)
    }

    /// Script directory from the flag, or the configured default
    pub fn script_directory(&self, flag: Option<PathBuf>) -> Result<PathBuf, RunnerError> {
        flag.or_else(|| self.default.script_directory.clone())
            .ok_or(RunnerError::MissingDirectory)
    }
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.jmeter.home.is_none());
        assert!(matches!(
            config.jmeter_home(),
            Err(RunnerError::MissingEngineHome)
        ));
    }

    #[test]
    fn test_load_yaml_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jmx-runner.yaml");
        std::fs::write(
            &path,
            "jmeter:\n  home: /opt/jmeter\ndefault:\n  script_directory: /srv/plans\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.jmeter_home().unwrap(), Path::new("/opt/jmeter"));
        assert_eq!(
            config.script_directory(None).unwrap(),
            PathBuf::from("/srv/plans")
        );
    }

    #[test]
    fn test_default_section_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jmx-runner.json");
        std::fs::write(&path, r#"{"jmeter": {"home": "/opt/jmeter"}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert!(config.default.script_directory.is_none());
        assert!(matches!(
            config.script_directory(None),
            Err(RunnerError::MissingDirectory)
        ));
        assert_eq!(
            config.script_directory(Some("plans".into())).unwrap(),
            PathBuf::from("plans")
        );
    }

    #[test]
    fn test_apply_env() {
        let mut config = AppConfig::default();
        config.jmeter.home = Some("/opt/jmeter".into());

        let env = EnvConfig {
            home_dir: Some("/usr/share/jmeter".to_string()),
            directory: Some("/srv/plans".to_string()),
            ..Default::default()
        };
        config.apply_env(&env);

        assert_eq!(config.jmeter_home().unwrap(), Path::new("/usr/share/jmeter"));
        assert_eq!(
            config.default.script_directory,
            Some(PathBuf::from("/srv/plans"))
        );
    }
}
