//! Service configuration: defaults, an optional TOML file, then `TALLY_*`
//! environment overrides, highest priority last.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const ENV_DATABASE_PATH: &str = "TALLY_DATABASE_PATH";
/// Environment variable overriding the log filter.
pub const ENV_LOG_FILTER: &str = "TALLY_LOG_FILTER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Where the checklist database lives.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Tracing filter directive, e.g. `info` or `tally_core=debug`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_filter: default_log_filter(),
        }
    }
}

/// Default location of the config file, under the platform config dir.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally/config.toml")
}

/// Read a config file, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<ServiceConfig> {
    if !path.exists() {
        return Ok(ServiceConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ServiceConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config: file (or defaults) plus env overrides.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn resolve(path: &Path) -> Result<ServiceConfig> {
    let mut config = load_file(path)?;
    apply_env(&mut config, env::vars());
    Ok(config)
}

/// Apply `TALLY_*` overrides from an environment snapshot. Split out from
/// [`resolve`] so tests can inject variables without touching the process
/// environment.
pub fn apply_env(config: &mut ServiceConfig, vars: impl Iterator<Item = (String, String)>) {
    for (key, value) in vars {
        match key.as_str() {
            ENV_DATABASE_PATH => config.database_path = PathBuf::from(value),
            ENV_LOG_FILTER => config.log_filter = value,
            _ => {}
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally/tally.sqlite3")
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::{ENV_DATABASE_PATH, ENV_LOG_FILTER, ServiceConfig, apply_env, load_file};
    use std::path::PathBuf;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = load_file(&dir.path().join("nope.toml")).expect("defaults");
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/var/lib/tally/lists.sqlite3\"\nlog_filter = \"debug\"\n",
        )
        .expect("write config");

        let config = load_file(&path).expect("parse config");
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/tally/lists.sqlite3")
        );
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_filter = \"trace\"\n").expect("write config");

        let config = load_file(&path).expect("parse config");
        assert_eq!(config.log_filter, "trace");
        assert_eq!(config.database_path, ServiceConfig::default().database_path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database_path = [not toml").expect("write config");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn env_wins_over_file_values() {
        let mut config = ServiceConfig {
            database_path: PathBuf::from("/from/file.sqlite3"),
            log_filter: "warn".to_string(),
        };
        let vars = vec![
            (ENV_DATABASE_PATH.to_string(), "/from/env.sqlite3".to_string()),
            (ENV_LOG_FILTER.to_string(), "tally_core=debug".to_string()),
            ("UNRELATED".to_string(), "ignored".to_string()),
        ];
        apply_env(&mut config, vars.into_iter());
        assert_eq!(config.database_path, PathBuf::from("/from/env.sqlite3"));
        assert_eq!(config.log_filter, "tally_core=debug");
    }
}
