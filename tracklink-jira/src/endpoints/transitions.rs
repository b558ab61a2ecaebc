use crate::client::JiraConnector;
use crate::error::Result;
use crate::models::{Item, JiraTransitions, TransitionRequest};
use crate::response::OperationKind;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> JiraConnector<T> {
  /// Get the workflow transitions currently available on an issue
  pub fn list_available_actions(&self, issue_key: &str) -> Result<Vec<Item>> {
    let request = ApiRequest::get("issue/{issueIdOrKey}/transitions")
      .segment("issueIdOrKey", issue_key)
      .query("expand", "transitions.fields");

    let transitions: JiraTransitions = self.send(&request, OperationKind::Read)?.json()?;
    Ok(transitions.transitions)
  }

  /// Move an issue through a workflow transition, optionally reassigning it
  pub fn progress_workflow(&self, issue_key: &str, transition_id: &str, assignee: Option<&str>) -> Result<()> {
    let payload = TransitionRequest::new(transition_id, assignee);

    let request = ApiRequest::post("issue/{issueIdOrKey}/transitions")
      .segment("issueIdOrKey", issue_key)
      .json(&payload)?;

    self.send(&request, OperationKind::Update)?;
    Ok(())
  }
}
