//! Configuration file discovery
//!
//! Finds and loads the runner configuration file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{AppConfig, EnvConfig};
use crate::error::RunnerError;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./jmx-runner.yaml",
    "./jmx-runner.yml",
    "./.jmx-runner.yaml",
    "~/.config/jmx-runner/config.yaml",
    "~/.jmx-runner.yaml",
];

/// Resolved configuration and where it came from
#[derive(Clone, Debug)]
pub struct ConfigFile {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        let locations: Vec<PathBuf> = CONFIG_LOCATIONS.iter().map(|l| expand_path(l)).collect();
        find_in(&locations)
    }

    /// Load the configuration, then apply environment overrides
    ///
    /// An explicit path wins over `JMX_RUNNER_CONFIG`, which wins over the
    /// standard locations. Without any file, environment overrides alone are
    /// accepted as long as they name the JMeter home.
    pub fn resolve(explicit: Option<&Path>, env: &EnvConfig) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.config_file.as_deref().map(expand_path))
            .or_else(Self::find);

        let mut config = match &path {
            Some(path) if !path.exists() => {
                return Err(RunnerError::ConfigNotFound(path.display().to_string()).into());
            }
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                AppConfig::load(path)?
            }
            None if env.home_dir.is_some() => {
                debug!("No configuration file, using environment overrides");
                AppConfig::default()
            }
            None => {
                return Err(RunnerError::ConfigNotFound(CONFIG_LOCATIONS.join(", ")).into());
            }
        };

        config.apply_env(env);

        Ok(Self {
            config,
            source: path,
        })
    }
}

fn find_in(locations: &[PathBuf]) -> Option<PathBuf> {
    locations.iter().find(|p| p.is_file()).cloned()
}

/// Expand ~ to home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("./test.yaml"), PathBuf::from("./test.yaml"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/x.yaml"), home.join("x.yaml"));
        }
    }

    #[test]
    fn test_find_in_precedence() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.yaml");
        let second = dir.path().join("second.yaml");
        fs::write(&second, "").unwrap();

        let locations = vec![first.clone(), second.clone()];
        assert_eq!(find_in(&locations), Some(second));

        fs::write(&first, "").unwrap();
        assert_eq!(find_in(&locations), Some(first));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runner.yaml");
        fs::write(&path, "jmeter:\n  home: /opt/jmeter\n").unwrap();

        let resolved = ConfigFile::resolve(Some(&path), &EnvConfig::default()).unwrap();
        assert_eq!(resolved.source.as_deref(), Some(path.as_path()));
        assert_eq!(resolved.config.jmeter_home().unwrap(), Path::new("/opt/jmeter"));
    }

    #[test]
    fn test_resolve_env_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("from-env.yaml");
        fs::write(&path, "jmeter:\n  home: /opt/jmeter\n").unwrap();

        let env = EnvConfig {
            config_file: Some(path.to_string_lossy().into_owned()),
            home_dir: Some("/override/jmeter".to_string()),
            ..Default::default()
        };
        let resolved = ConfigFile::resolve(None, &env).unwrap();
        assert_eq!(resolved.source, Some(path));
        assert_eq!(
            resolved.config.jmeter_home().unwrap(),
            Path::new("/override/jmeter")
        );
    }

    #[test]
    fn test_resolve_missing_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = ConfigFile::resolve(Some(&path), &EnvConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::ConfigNotFound(_))
        ));
    }
}
