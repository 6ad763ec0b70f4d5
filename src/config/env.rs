//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "JMX_RUNNER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// JMeter home from JMX_RUNNER_HOME_DIR
    pub home_dir: Option<String>,
    /// Config file from JMX_RUNNER_CONFIG
    pub config_file: Option<String>,
    /// Default script directory from JMX_RUNNER_DIRECTORY
    pub directory: Option<String>,
    /// Project label from JMX_RUNNER_PROJECT
    pub project: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            home_dir: get_env("HOME_DIR"),
            config_file: get_env("CONFIG"),
            directory: get_env("DIRECTORY"),
            project: get_env("PROJECT"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.home_dir.is_some()
            || self.config_file.is_some()
            || self.directory.is_some()
            || self.project.is_some()
    }
}

/// Get environment variable with prefix, ignoring empty values
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Help text listing the recognised variables
pub const ENV_HELP: &str = "Environment variables:
  JMX_RUNNER_HOME_DIR    JMeter home directory
  JMX_RUNNER_CONFIG      Path to configuration file
  JMX_RUNNER_DIRECTORY   Default script directory
  JMX_RUNNER_PROJECT     Default project label";

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_{name}"), value.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
