//! # Config Command
//!
//! Shows and edits the stored Jira connection settings. The API token is only
//! ever read from the environment.

#![allow(clippy::print_stdout)]

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracklink_core::config::{ENV_JIRA_API_TOKEN, ENV_JIRA_HOST, ENV_JIRA_USER};
use tracklink_core::output::{format_or_dash, print_info, print_success};
use tracklink_core::url::ensure_url_scheme;
use tracklink_core::{ConfigDirs, ConnectionConfig, get_config_dirs};

use super::print_json;

/// Command for managing the connection settings
#[derive(Args, Debug)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommands {
  /// Show the stored settings and which environment overrides are active
  Show,

  /// Store the Jira host and/or username
  #[command(long_about = "Store the Jira host and/or username in connection.toml.\n\n\
                     The API token is never written to disk; export it as JIRA_API_TOKEN.")]
  Set {
    /// The Jira host (e.g., company.atlassian.net)
    #[arg(long)]
    host: Option<String>,

    /// The Jira username
    #[arg(long)]
    username: Option<String>,
  },
}

#[derive(Serialize)]
struct ConfigReport {
  path: String,
  host: Option<String>,
  username: Option<String>,
  env_host: bool,
  env_username: bool,
  api_token_set: bool,
}

/// Handle `tracklink config`
pub(crate) fn handle_config_command(args: ConfigArgs, json: bool) -> Result<()> {
  let config_dirs = get_config_dirs()?;

  match args.subcommand {
    ConfigSubcommands::Show => show_config(&config_dirs, json),
    ConfigSubcommands::Set { host, username } => {
      set_config(&config_dirs, host.as_deref(), username.as_deref())?;
      print_success(&format!(
        "Saved connection settings to {}",
        config_dirs.connection_config_path().display()
      ));
      Ok(())
    }
  }
}

fn env_is_set(name: &str) -> bool {
  std::env::var(name).is_ok_and(|value| !value.trim().is_empty())
}

fn show_config(config_dirs: &ConfigDirs, json: bool) -> Result<()> {
  let config = config_dirs.load_connection_config()?;
  let report = ConfigReport {
    path: config_dirs.connection_config_path().display().to_string(),
    host: config.host,
    username: config.username,
    env_host: env_is_set(ENV_JIRA_HOST),
    env_username: env_is_set(ENV_JIRA_USER),
    api_token_set: env_is_set(ENV_JIRA_API_TOKEN),
  };

  if json {
    print_json(&report);
    return Ok(());
  }

  println!("{}", "Jira Connection".bold().underline());
  println!("  {:<10} {}", "File:", report.path);
  println!(
    "  {:<10} {}",
    "Host:",
    format_or_dash(report.host.as_deref().unwrap_or_default())
  );
  println!(
    "  {:<10} {}",
    "Username:",
    format_or_dash(report.username.as_deref().unwrap_or_default())
  );
  println!(
    "  {:<10} {}",
    "Token:",
    if report.api_token_set {
      "set".green().to_string()
    } else {
      "not set".yellow().to_string()
    }
  );

  for (active, name) in [(report.env_host, ENV_JIRA_HOST), (report.env_username, ENV_JIRA_USER)] {
    if active {
      print_info(&format!("'{name}' is set and overrides the stored value"));
    }
  }

  Ok(())
}

/// Merge the given values into the stored config and save it
fn set_config(config_dirs: &ConfigDirs, host: Option<&str>, username: Option<&str>) -> Result<ConnectionConfig> {
  if host.is_none() && username.is_none() {
    bail!("Nothing to set. Pass --host and/or --username.");
  }

  let mut config = config_dirs.load_connection_config()?;

  if let Some(host) = host {
    config.host = Some(ensure_url_scheme(host)?);
  }
  if let Some(username) = username {
    let username = username.trim();
    if username.is_empty() {
      bail!("Username cannot be empty");
    }
    config.username = Some(username.to_string());
  }

  config_dirs.save_connection_config(&config)?;
  Ok(config)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_set_config_normalises_host() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path().join("tracklink"));

    let config = set_config(&config_dirs, Some("company.atlassian.net"), None).unwrap();

    assert_eq!(config.host.as_deref(), Some("https://company.atlassian.net"));
    assert_eq!(config_dirs.load_connection_config().unwrap(), config);
  }

  #[test]
  fn test_set_config_merges_with_stored_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());

    set_config(&config_dirs, Some("https://jira.example.com"), None).unwrap();
    let config = set_config(&config_dirs, None, Some("alice")).unwrap();

    assert_eq!(config.host.as_deref(), Some("https://jira.example.com"));
    assert_eq!(config.username.as_deref(), Some("alice"));
  }

  #[test]
  fn test_set_config_requires_a_value() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());

    assert!(set_config(&config_dirs, None, None).is_err());
    assert!(set_config(&config_dirs, None, Some("  ")).is_err());
    assert!(!config_dirs.connection_config_path().exists());
  }

  #[test]
  fn test_show_config_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());

    show_config(&config_dirs, true).unwrap();
    show_config(&config_dirs, false).unwrap();
  }
}
