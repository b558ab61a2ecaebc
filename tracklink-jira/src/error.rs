//! Error types for the Jira connector

use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`crate::JiraConnector`] operations.
#[derive(Error, Debug)]
pub enum JiraError {
  /// Jira answered 401 for the configured credential.
  #[error("Authentication failed. Please check your Jira credentials.")]
  Unauthorized,

  /// Jira answered with a status the operation does not accept.
  #[error("Unexpected Jira response: HTTP {status} - {body}")]
  Remote { status: StatusCode, body: String },

  /// The edit metadata of the issue does not list the field.
  #[error("Field metadata is missing for '{0}'")]
  MetadataMissing(String),

  /// The edit metadata lists the field without a schema type.
  #[error("Field metadata for '{0}' is missing a type")]
  MetadataTypeMissing(String),

  #[error("Failed to reach Jira: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Failed to decode Jira response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("Invalid Jira URL: {0}")]
  InvalidUrl(String),
}

impl JiraError {
  /// Whether the failure asks the caller to re-authenticate.
  pub const fn is_auth_failure(&self) -> bool {
    matches!(self, Self::Unauthorized)
  }

  /// Whether the failure comes from a bad field name rather than the remote.
  pub const fn is_caller_error(&self) -> bool {
    matches!(self, Self::MetadataMissing(_) | Self::MetadataTypeMissing(_))
  }
}

impl From<url::ParseError> for JiraError {
  fn from(err: url::ParseError) -> Self {
    Self::InvalidUrl(err.to_string())
  }
}

pub type Result<T> = std::result::Result<T, JiraError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_kinds() {
    assert!(JiraError::Unauthorized.is_auth_failure());
    assert!(!JiraError::Unauthorized.is_caller_error());

    assert!(JiraError::MetadataMissing("labels".to_string()).is_caller_error());
    assert!(JiraError::MetadataTypeMissing("labels".to_string()).is_caller_error());

    let remote = JiraError::Remote {
      status: StatusCode::NOT_FOUND,
      body: "{}".to_string(),
    };
    assert!(!remote.is_auth_failure());
    assert!(!remote.is_caller_error());
  }

  #[test]
  fn test_remote_error_message_keeps_body() {
    let err = JiraError::Remote {
      status: StatusCode::BAD_REQUEST,
      body: r#"{"errorMessages":["Field 'foo' cannot be set."]}"#.to_string(),
    };

    let message = err.to_string();
    assert!(message.contains("400 Bad Request"));
    assert!(message.contains("Field 'foo' cannot be set."));
  }
}
