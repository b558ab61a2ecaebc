//! # Jira Connector
//!
//! The connector facade composing transport, response classification and the
//! endpoint implementations under [`crate::endpoints`].

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::JiraAuth;
use crate::response::OperationKind;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Represents a connection to one Jira instance
pub struct JiraConnector<T = HttpTransport> {
  pub(crate) transport: T,
  pub(crate) username: String,
}

impl JiraConnector<HttpTransport> {
  /// Connect to the Jira instance at `base_url`.
  ///
  /// Basic auth is only attached when both `username` and `password` are
  /// non-empty.
  pub fn connect(base_url: &str, username: &str, password: &str) -> Result<Self> {
    let transport = HttpTransport::new(base_url, JiraAuth::from_parts(username, password))?;
    Ok(Self::with_transport(transport, username))
  }
}

impl<T: Transport> JiraConnector<T> {
  /// Create a connector over any transport
  pub fn with_transport(transport: T, username: &str) -> Self {
    Self {
      transport,
      username: username.to_string(),
    }
  }

  /// The username the connector was configured with
  pub fn username(&self) -> &str {
    &self.username
  }

  /// Check that the configured user can be looked up with the credential.
  ///
  /// Every failure, including transport errors, reads as `false`.
  pub fn validate_credential(&self) -> bool {
    let request = ApiRequest::get("user").query("username", &self.username);

    match self.send(&request, OperationKind::Read) {
      Ok(_) => true,
      Err(err) => {
        warn!(username = %self.username, "Jira credential validation failed: {err}");
        false
      }
    }
  }

  /// Execute a request and classify its response
  pub(crate) fn send(&self, request: &ApiRequest, kind: OperationKind) -> Result<ApiResponse> {
    debug!(method = %request.method, path = %request.path(), "Executing Jira operation");
    self.transport.execute(request)?.expect(kind)
  }
}
