//! # Jira Transport
//!
//! Request/response plumbing between the connector and the Jira REST API. The
//! connector only ever talks to a [`Transport`], so tests can swap the HTTP
//! implementation for a scripted one.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::consts;
use crate::error::{JiraError, Result};
use crate::models::JiraAuth;

/// A single request against a Jira resource.
///
/// `resource` may contain `{name}` placeholders which are filled from the path
/// segments when the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub resource: String,
  pub query: Vec<(String, String)>,
  pub segments: Vec<(String, String)>,
  pub body: Option<serde_json::Value>,
}

impl ApiRequest {
  pub fn new(method: Method, resource: &str) -> Self {
    Self {
      method,
      resource: resource.to_string(),
      query: Vec::new(),
      segments: Vec::new(),
      body: None,
    }
  }

  pub fn get(resource: &str) -> Self {
    Self::new(Method::GET, resource)
  }

  pub fn post(resource: &str) -> Self {
    Self::new(Method::POST, resource)
  }

  pub fn put(resource: &str) -> Self {
    Self::new(Method::PUT, resource)
  }

  /// Add a query parameter
  pub fn query(mut self, name: &str, value: impl ToString) -> Self {
    self.query.push((name.to_string(), value.to_string()));
    self
  }

  /// Bind a `{name}` placeholder of the resource template
  pub fn segment(mut self, name: &str, value: &str) -> Self {
    self.segments.push((name.to_string(), value.to_string()));
    self
  }

  /// Attach a JSON body
  pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
    self.body = Some(serde_json::to_value(body)?);
    Ok(self)
  }

  /// Path components with every placeholder substituted, unencoded.
  pub fn path_components(&self) -> Vec<String> {
    self
      .resource
      .split('/')
      .map(|component| {
        component
          .strip_prefix('{')
          .and_then(|rest| rest.strip_suffix('}'))
          .and_then(|name| {
            self
              .segments
              .iter()
              .find(|(segment, _)| segment == name)
              .map(|(_, value)| value.clone())
          })
          .unwrap_or_else(|| component.to_string())
      })
      .collect()
  }

  /// The resolved resource path, e.g. `issue/PROJ-5/comment`
  pub fn path(&self) -> String {
    self.path_components().join("/")
  }

  /// Value of a query parameter, if present
  pub fn query_value(&self, name: &str) -> Option<&str> {
    self
      .query
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }
}

/// Raw outcome of a request: status code and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status: StatusCode,
  pub body: String,
}

impl ApiResponse {
  pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }
}

/// Executes requests against a fixed Jira instance.
pub trait Transport {
  fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
  fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
    (**self).execute(request)
  }
}

/// Blocking HTTP transport backed by reqwest
pub struct HttpTransport {
  client: Client,
  api_url: Url,
  auth: Option<JiraAuth>,
}

impl HttpTransport {
  /// Create a transport for the Jira instance at `base_url`.
  ///
  /// Resources are resolved below `<base_url>/rest/api/2/`.
  pub fn new(base_url: &str, auth: Option<JiraAuth>) -> Result<Self> {
    let client = Client::builder().build()?;
    let api_url = api_url(base_url)?;

    Ok(Self { client, api_url, auth })
  }

  /// The API root every resource is resolved against
  pub const fn api_url(&self) -> &Url {
    &self.api_url
  }

  fn url_for(&self, request: &ApiRequest) -> Result<Url> {
    let mut url = self.api_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| JiraError::InvalidUrl(format!("{} cannot carry API paths", self.api_url)))?
      .pop_if_empty()
      .extend(request.path_components());
    Ok(url)
  }
}

impl Transport for HttpTransport {
  fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
    let url = self.url_for(request)?;
    debug!(method = %request.method, %url, "Sending Jira request");

    let mut builder = self
      .client
      .request(request.method.clone(), url)
      .query(&request.query)
      .header(ACCEPT, "application/json")
      .header(USER_AGENT, consts::USER_AGENT);

    if let Some(auth) = &self.auth {
      builder = builder.basic_auth(&auth.username, Some(&auth.api_token));
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send()?;
    let status = response.status();
    let body = response.text()?;

    debug!(%status, path = %request.path(), "Received Jira response");
    trace!(%body, "Jira response body");

    Ok(ApiResponse { status, body })
  }
}

/// Build the API root URL from an instance base URL.
fn api_url(base_url: &str) -> Result<Url> {
  let mut base = base_url.trim().to_string();
  if !base.ends_with('/') {
    base.push('/');
  }

  let url = Url::parse(&base)?.join(consts::API_PATH)?;
  if url.cannot_be_a_base() {
    return Err(JiraError::InvalidUrl(format!("{base_url} cannot carry API paths")));
  }
  Ok(url)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_path_substitutes_segments() {
    let request = ApiRequest::post("issue/{issueIdOrKey}/comment").segment("issueIdOrKey", "PROJ-5");

    assert_eq!(request.path(), "issue/PROJ-5/comment");
    assert_eq!(request.path_components(), vec!["issue", "PROJ-5", "comment"]);
  }

  #[test]
  fn test_path_keeps_unbound_placeholders() {
    let request = ApiRequest::get("issue/{issueIdOrKey}");

    assert_eq!(request.path(), "issue/{issueIdOrKey}");
  }

  #[test]
  fn test_query_and_body() -> anyhow::Result<()> {
    let request = ApiRequest::get("search")
      .query("jql", "filter=10100")
      .query("startAt", 20)
      .json(&json!({ "body": "hello" }))?;

    assert_eq!(request.query_value("jql"), Some("filter=10100"));
    assert_eq!(request.query_value("startAt"), Some("20"));
    assert_eq!(request.query_value("maxResults"), None);
    assert_eq!(request.body, Some(json!({ "body": "hello" })));

    Ok(())
  }

  #[test]
  fn test_api_url() -> anyhow::Result<()> {
    assert_eq!(
      api_url("https://company.atlassian.net")?.as_str(),
      "https://company.atlassian.net/rest/api/2/"
    );
    assert_eq!(
      api_url("https://example.com/jira/")?.as_str(),
      "https://example.com/jira/rest/api/2/"
    );
    assert!(api_url("not a url").is_err());

    Ok(())
  }

  #[test]
  fn test_url_for_encodes_segments() -> anyhow::Result<()> {
    let transport = HttpTransport::new("https://company.atlassian.net", None)?;
    let request = ApiRequest::get("issue/{issueIdOrKey}/editmeta").segment("issueIdOrKey", "A B/1");

    let url = transport.url_for(&request)?;
    assert_eq!(
      url.as_str(),
      "https://company.atlassian.net/rest/api/2/issue/A%20B%2F1/editmeta"
    );

    Ok(())
  }
}
