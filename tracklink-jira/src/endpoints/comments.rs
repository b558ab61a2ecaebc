use crate::client::JiraConnector;
use crate::error::Result;
use crate::models::CommentRequest;
use crate::response::OperationKind;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> JiraConnector<T> {
  /// Add a plain-text comment to an issue
  pub fn add_comment(&self, issue_key: &str, text: &str) -> Result<()> {
    let payload = CommentRequest { body: text.to_string() };

    let request = ApiRequest::post("issue/{issueIdOrKey}/comment")
      .segment("issueIdOrKey", issue_key)
      .json(&payload)?;

    self.send(&request, OperationKind::Create)?;
    Ok(())
  }
}
