//! # Configuration Management
//!
//! Locates the tracklink configuration directory (XDG aware) and loads the
//! Jira connection settings from `connection.toml`, with environment
//! variables taking precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::url::ensure_url_scheme;

/// Environment variable storing the Jira host
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Environment variable storing the Jira username
pub const ENV_JIRA_USER: &str = "JIRA_USER";
/// Environment variable storing the Jira API token or password
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Represents the configuration directories for the tracklink application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance from the platform directories
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "tracklink").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit configuration directory
  pub fn at(config_dir: impl AsRef<Path>) -> Self {
    Self {
      config_dir: config_dir.as_ref().to_path_buf(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the connection configuration file
  pub fn connection_config_path(&self) -> PathBuf {
    self.config_dir.join("connection.toml")
  }

  /// Load the connection configuration, or defaults when the file is absent
  pub fn load_connection_config(&self) -> Result<ConnectionConfig> {
    let config_path = self.connection_config_path();

    if !config_path.exists() {
      return Ok(ConnectionConfig::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read connection config from {}", config_path.display()))?;

    toml::from_str(&content)
      .with_context(|| format!("Failed to parse connection config from {}", config_path.display()))
  }

  /// Save the connection configuration
  pub fn save_connection_config(&self, config: &ConnectionConfig) -> Result<()> {
    let config_path = self.connection_config_path();

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;

    let content = toml::to_string_pretty(config).context("Failed to serialize connection config to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write connection config to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Persisted connection settings. The API token is never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub host: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
}

/// Fully resolved settings used to build a connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
  pub base_url: String,
  pub username: String,
  pub api_token: String,
}

impl ConnectionConfig {
  /// Resolve settings, letting `lookup` (usually the process environment)
  /// override the file values.
  pub fn resolve_with<F>(&self, lookup: F) -> Result<ConnectionSettings>
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let host = non_empty(ENV_JIRA_HOST).or_else(|| self.host.clone()).ok_or_else(|| {
      anyhow::anyhow!("No Jira host configured. Set '{ENV_JIRA_HOST}' or run 'tracklink config set --host <HOST>'.")
    })?;
    let base_url = ensure_url_scheme(&host).context("Invalid Jira host")?;

    let username = non_empty(ENV_JIRA_USER)
      .or_else(|| self.username.clone())
      .unwrap_or_default();
    let api_token = non_empty(ENV_JIRA_API_TOKEN).unwrap_or_default();

    Ok(ConnectionSettings {
      base_url,
      username,
      api_token,
    })
  }

  /// Resolve settings against the process environment
  pub fn resolve(&self) -> Result<ConnectionSettings> {
    self.resolve_with(|name| std::env::var(name).ok())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tempfile::TempDir;
  use tracklink_test_utils::EnvTestGuard;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name: &str| vars.get(name).cloned()
  }

  #[test]
  fn test_config_dirs_follow_xdg() {
    let test_env = EnvTestGuard::new();

    let config_dirs = ConfigDirs::new().unwrap();

    assert!(config_dirs.config_dir().starts_with(test_env.config_dir()));
    assert!(config_dirs.connection_config_path().ends_with("tracklink/connection.toml"));
  }

  #[test]
  fn test_load_missing_config_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path().join("tracklink"));

    assert_eq!(config_dirs.load_connection_config().unwrap(), ConnectionConfig::default());
  }

  #[test]
  fn test_save_and_load_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path().join("nested/tracklink"));
    let config = ConnectionConfig {
      host: Some("company.atlassian.net".to_string()),
      username: Some("alice".to_string()),
    };

    config_dirs.save_connection_config(&config).unwrap();

    let content = fs::read_to_string(config_dirs.connection_config_path()).unwrap();
    assert!(content.contains("host = \"company.atlassian.net\""));
    assert!(!content.contains("token"));
    assert_eq!(config_dirs.load_connection_config().unwrap(), config);
  }

  #[test]
  fn test_load_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());
    fs::write(config_dirs.connection_config_path(), "host = [").unwrap();

    let err = config_dirs.load_connection_config().unwrap_err();
    assert!(err.to_string().contains("Failed to parse connection config"));
  }

  #[test]
  fn test_resolve_from_file() {
    let config = ConnectionConfig {
      host: Some("company.atlassian.net".to_string()),
      username: Some("alice".to_string()),
    };

    let settings = config.resolve_with(env(&[(ENV_JIRA_API_TOKEN, "secret")])).unwrap();

    assert_eq!(
      settings,
      ConnectionSettings {
        base_url: "https://company.atlassian.net".to_string(),
        username: "alice".to_string(),
        api_token: "secret".to_string(),
      }
    );
  }

  #[test]
  fn test_resolve_env_overrides_file() {
    let config = ConnectionConfig {
      host: Some("old.example.com".to_string()),
      username: Some("alice".to_string()),
    };

    let settings = config
      .resolve_with(env(&[
        (ENV_JIRA_HOST, "http://jira.internal:8080"),
        (ENV_JIRA_USER, "bob"),
        (ENV_JIRA_API_TOKEN, "token"),
      ]))
      .unwrap();

    assert_eq!(settings.base_url, "http://jira.internal:8080");
    assert_eq!(settings.username, "bob");
    assert_eq!(settings.api_token, "token");
  }

  #[test]
  fn test_resolve_ignores_blank_env_values() {
    let config = ConnectionConfig {
      host: Some("company.atlassian.net".to_string()),
      username: None,
    };

    let settings = config.resolve_with(env(&[(ENV_JIRA_HOST, "  ")])).unwrap();

    assert_eq!(settings.base_url, "https://company.atlassian.net");
    assert_eq!(settings.username, "");
    assert_eq!(settings.api_token, "");
  }

  #[test]
  fn test_resolve_requires_host() {
    let err = ConnectionConfig::default().resolve_with(env(&[])).unwrap_err();

    assert!(err.to_string().contains(ENV_JIRA_HOST));
  }
}
