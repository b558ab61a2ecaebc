//! # Jira Issue Endpoints
//!
//! Single-issue reads and field updates. Updates look up the field's edit
//! metadata first because the body shape depends on the field type.

use tracing::debug;

use crate::client::JiraConnector;
use crate::error::Result;
use crate::models::{FieldTypeDescriptor, Issue, JiraIssue};
use crate::response::OperationKind;
use crate::transport::{ApiRequest, Transport};
use crate::update::FieldUpdate;

impl<T: Transport> JiraConnector<T> {
  /// Get a Jira issue by id or key
  pub fn get_issue(&self, issue_key: &str) -> Result<Issue> {
    let request = ApiRequest::get("issue/{issueIdOrKey}").segment("issueIdOrKey", issue_key);

    let issue: JiraIssue = self.send(&request, OperationKind::Read)?.json()?;
    Ok(issue.into())
  }

  /// Resolve the type descriptor of `field_name` on an issue
  pub fn resolve_field(&self, issue_key: &str, field_name: &str) -> Result<FieldTypeDescriptor> {
    let request = ApiRequest::get("issue/{issueIdOrKey}/editmeta").segment("issueIdOrKey", issue_key);

    let edit_metadata: serde_json::Value = self.send(&request, OperationKind::Read)?.json()?;
    FieldTypeDescriptor::from_edit_metadata(&edit_metadata, field_name)
  }

  /// Set one field of an issue and return the issue as stored afterwards.
  pub fn update_issue_field(&self, issue_key: &str, field_name: &str, value: &str) -> Result<Issue> {
    let descriptor = self.resolve_field(issue_key, field_name)?;
    let update = FieldUpdate::new(&descriptor, field_name, value);
    debug!(issue_key, field = update.field(), ?descriptor, "Updating Jira issue field");

    let request = ApiRequest::put("issue/{issueIdOrKey}")
      .segment("issueIdOrKey", issue_key)
      .json(&update)?;
    self.send(&request, OperationKind::Update)?;

    self.get_issue(issue_key)
  }
}
