//! # Validate Command
//!
//! Checks that Jira accepts the configured credential.

use anyhow::{Result, bail};
use serde::Serialize;
use tracklink_core::config::{ENV_JIRA_API_TOKEN, ENV_JIRA_USER};
use tracklink_core::output::{print_success, print_warning};
use tracklink_jira::{JiraConnector, Transport};

use super::print_json;

#[derive(Serialize)]
struct ValidationReport<'a> {
  username: &'a str,
  valid: bool,
}

/// Handle `tracklink validate`. Fails when the credential is not accepted so
/// the process exits non-zero.
pub(crate) fn handle_validate_command<T: Transport>(connector: &JiraConnector<T>, json: bool) -> Result<()> {
  let username = connector.username();
  let valid = connector.validate_credential();

  if json {
    print_json(&ValidationReport { username, valid });
  }

  if !valid {
    print_warning(&format!(
      "Check '{ENV_JIRA_USER}' and '{ENV_JIRA_API_TOKEN}', then run with -v for details."
    ));
    bail!("Jira did not accept the credential for user '{username}'");
  }

  if !json {
    print_success(&format!("Jira accepted the credential for user '{username}'"));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use reqwest::StatusCode;
  use serde_json::json;
  use tracklink_test_utils::ScriptedTransport;

  use super::*;

  #[test]
  fn test_validate_accepted() {
    let transport = ScriptedTransport::new().respond_json(StatusCode::OK, json!({ "name": "alice" }));
    let connector = JiraConnector::with_transport(&transport, "alice");

    handle_validate_command(&connector, false).unwrap();

    assert_eq!(transport.requests()[0].query_value("username"), Some("alice"));
  }

  #[test]
  fn test_validate_rejected_fails() {
    let transport = ScriptedTransport::new().respond(StatusCode::UNAUTHORIZED, "");
    let connector = JiraConnector::with_transport(&transport, "alice");

    let err = handle_validate_command(&connector, true).unwrap_err();

    assert!(err.to_string().contains("did not accept the credential for user 'alice'"));
  }
}
