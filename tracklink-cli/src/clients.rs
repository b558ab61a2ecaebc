//! # Client Creation
//!
//! Builds a [`JiraConnector`] from the stored connection config and the
//! `JIRA_*` environment variables.

use anyhow::{Context, Result};
use tracing::{debug, warn};
use tracklink_core::{ConfigDirs, ConnectionSettings, get_config_dirs};
use tracklink_jira::JiraConnector;

/// Creates a Jira connector from the default configuration directory
pub fn create_jira_connector() -> Result<JiraConnector> {
  let config_dirs = get_config_dirs()?;
  create_jira_connector_from(&config_dirs)
}

/// Creates a Jira connector from the configuration stored in `config_dirs`
pub fn create_jira_connector_from(config_dirs: &ConfigDirs) -> Result<JiraConnector> {
  let settings = config_dirs
    .load_connection_config()?
    .resolve()
    .context("Failed to resolve Jira connection settings")?;

  connector_for(&settings)
}

/// Creates a Jira connector for already resolved settings
pub fn connector_for(settings: &ConnectionSettings) -> Result<JiraConnector> {
  if settings.username.is_empty() || settings.api_token.is_empty() {
    warn!("Jira username or API token missing, requests will be sent anonymously");
  }
  debug!(base_url = %settings.base_url, username = %settings.username, "Creating Jira connector");

  JiraConnector::connect(&settings.base_url, &settings.username, &settings.api_token)
    .with_context(|| format!("Failed to create Jira connector for {}", settings.base_url))
}
