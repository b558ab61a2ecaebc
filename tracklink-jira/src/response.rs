//! # Response Classification
//!
//! Every Jira call runs its response through [`classify`] so that status
//! handling stays identical across operations.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{JiraError, Result};
use crate::transport::ApiResponse;

/// The kind of operation a request performs, which fixes its success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
  /// Reads answer 200 OK
  Read,
  /// Creations answer 201 Created
  Create,
  /// Updates and transitions answer 204 No Content
  Update,
}

impl OperationKind {
  pub const fn success_status(self) -> StatusCode {
    match self {
      Self::Read => StatusCode::OK,
      Self::Create => StatusCode::CREATED,
      Self::Update => StatusCode::NO_CONTENT,
    }
  }
}

/// Classification of a response status for a given operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
  Success,
  AuthFailure,
  OtherFailure,
}

pub fn classify(kind: OperationKind, status: StatusCode) -> ResponseClass {
  if status == kind.success_status() {
    ResponseClass::Success
  } else if status == StatusCode::UNAUTHORIZED {
    ResponseClass::AuthFailure
  } else {
    ResponseClass::OtherFailure
  }
}

impl ApiResponse {
  /// Keep the response if its status is the success status of `kind`,
  /// otherwise turn it into the matching error.
  pub fn expect(self, kind: OperationKind) -> Result<Self> {
    match classify(kind, self.status) {
      ResponseClass::Success => Ok(self),
      ResponseClass::AuthFailure => Err(JiraError::Unauthorized),
      ResponseClass::OtherFailure => Err(JiraError::Remote {
        status: self.status,
        body: self.body,
      }),
    }
  }

  /// Decode the body as JSON
  pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
    Ok(serde_json::from_str(&self.body)?)
  }
}
