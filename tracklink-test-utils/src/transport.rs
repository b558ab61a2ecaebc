//! Scripted Jira transport for connector tests
//!
//! [`ScriptedTransport`] answers requests from a queue of canned responses in
//! the order they were pushed and records every request it receives, so tests
//! can assert on both the calls made and their order.

use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tracklink_jira::{ApiRequest, ApiResponse, Result, Transport};

/// Transport double replaying queued responses
#[derive(Default)]
pub struct ScriptedTransport {
  responses: Mutex<VecDeque<ApiResponse>>,
  requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue a response with a JSON body
  pub fn respond_json(self, status: StatusCode, body: Value) -> Self {
    self.respond(status, &body.to_string())
  }

  /// Queue a response with a raw body
  pub fn respond(self, status: StatusCode, body: &str) -> Self {
    self
      .responses
      .lock()
      .expect("response queue poisoned")
      .push_back(ApiResponse::new(status, body));
    self
  }

  /// Every request executed so far, in order
  pub fn requests(&self) -> Vec<ApiRequest> {
    self.requests.lock().expect("request log poisoned").clone()
  }

  /// Number of requests executed so far
  pub fn request_count(&self) -> usize {
    self.requests.lock().expect("request log poisoned").len()
  }

  /// Number of queued responses not consumed yet
  pub fn pending(&self) -> usize {
    self.responses.lock().expect("response queue poisoned").len()
  }
}

impl Transport for ScriptedTransport {
  fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
    self
      .requests
      .lock()
      .expect("request log poisoned")
      .push(request.clone());

    let response = self
      .responses
      .lock()
      .expect("response queue poisoned")
      .pop_front()
      .unwrap_or_else(|| panic!("no scripted response left for {} {}", request.method, request.path()));
    Ok(response)
  }
}

/// A Jira issue object numbered `n`, keyed `PROJ-<n>`
pub fn issue_json(n: usize) -> Value {
  json!({
      "id": n.to_string(),
      "key": format!("PROJ-{n}"),
      "fields": {
          "summary": format!("Issue {n}"),
          "description": null,
          "project": { "name": "Project" },
          "issuetype": { "name": "Task" },
          "assignee": null,
          "priority": { "name": "Major" }
      }
  })
}

/// A full search page starting at `start_at` for a result set of `total`
/// issues numbered from 0
pub fn search_page_json(start_at: usize, page_size: usize, total: usize) -> Value {
  let end = total.min(start_at + page_size);
  let issues: Vec<Value> = (start_at..end).map(issue_json).collect();

  json!({
      "startAt": start_at,
      "maxResults": page_size,
      "total": total,
      "issues": issues
  })
}
