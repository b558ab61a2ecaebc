//! Environment variable management for testing
//!
//! This module provides guards that override environment variables for the
//! duration of a test and restore them when dropped.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// An isolated tracklink environment: XDG config directory points into a per-test
/// temporary directory and the `JIRA_*` connection variables start unset.
pub struct EnvTestGuard {
  /// The temporary directory backing the XDG directories
  pub temp_dir: TempDir,
  /// Guards restoring the original values
  vars: Vec<EnvVarGuard>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const JIRA_HOST: &'static str = "JIRA_HOST";
  pub const JIRA_USER: &'static str = "JIRA_USER";
  pub const JIRA_API_TOKEN: &'static str = "JIRA_API_TOKEN";

  /// Create a new isolated environment
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).expect("Failed to create XDG config directory");

    let config_guard = EnvVarGuard::new(Self::XDG_CONFIG_HOME);
    config_guard.set(&config_home.to_string_lossy());
    let mut vars = vec![config_guard];

    for name in [Self::JIRA_HOST, Self::JIRA_USER, Self::JIRA_API_TOKEN] {
      let guard = EnvVarGuard::new(name);
      guard.remove();
      vars.push(guard);
    }

    Self { temp_dir, vars }
  }

  /// Export Jira connection variables until the guard is dropped
  pub fn with_jira_env(self, host: &str, username: &str, api_token: &str) -> Self {
    for (name, value) in [
      (Self::JIRA_HOST, host),
      (Self::JIRA_USER, username),
      (Self::JIRA_API_TOKEN, api_token),
    ] {
      env_set(name, value);
    }
    self
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }
}

fn env_set(name: &str, value: &str) {
  // SAFETY: test-only; callers serialise tests that touch the environment.
  unsafe {
    env::set_var(name, value);
  }
}

fn env_remove(name: &str) {
  // SAFETY: test-only; callers serialise tests that touch the environment.
  unsafe {
    env::remove_var(name);
  }
}

/// Overrides a single environment variable and restores the original value
/// on drop
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Capture the current value of `name`
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the variable for the rest of the guard's lifetime
  pub fn set(&self, value: &str) {
    env_set(&self.name, value);
  }

  /// Remove the variable for the rest of the guard's lifetime
  pub fn remove(&self) {
    env_remove(&self.name);
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(value) => env_set(&self.name, value),
      None => env_remove(&self.name),
    }
  }
}
