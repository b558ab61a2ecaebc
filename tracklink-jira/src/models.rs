use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::consts::{ARRAY_TYPE, MULTISELECT_CUSTOM_TYPE};
use crate::error::{JiraError, Result};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

impl JiraAuth {
  /// Build credentials only when both parts are present.
  pub fn from_parts(username: &str, api_token: &str) -> Option<Self> {
    if username.is_empty() || api_token.is_empty() {
      return None;
    }

    Some(Self {
      username: username.to_string(),
      api_token: api_token.to_string(),
    })
  }
}

/// An issue as returned to callers of the connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
  pub id: u64,
  pub key: String,
  pub summary: String,
  pub description: String,
  pub project: String,
  pub issue_type: String,
  pub assignee: String,
  pub priority: String,
}

/// Represents a Jira issue on the wire
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: u64,
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
#[derive(Debug, Default, Deserialize)]
pub struct JiraIssueFields {
  pub summary: Option<String>,
  pub description: Option<String>,
  pub project: Option<JiraNamed>,
  pub issuetype: Option<JiraNamed>,
  pub assignee: Option<JiraNamed>,
  pub priority: Option<JiraNamed>,
}

/// Any nested Jira object referenced by name (project, user, priority, ...)
#[derive(Debug, Default, Deserialize)]
pub struct JiraNamed {
  #[serde(default)]
  pub name: Option<String>,
}

fn name_of(named: Option<JiraNamed>) -> String {
  named.and_then(|named| named.name).unwrap_or_default()
}

impl From<JiraIssue> for Issue {
  fn from(issue: JiraIssue) -> Self {
    let fields = issue.fields;
    Self {
      id: issue.id,
      key: issue.key,
      summary: fields.summary.unwrap_or_default(),
      description: fields.description.unwrap_or_default(),
      project: name_of(fields.project),
      issue_type: name_of(fields.issuetype),
      assignee: name_of(fields.assignee),
      priority: name_of(fields.priority),
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
  Text(String),
  Number(u64),
}

/// Jira sends numeric ids as strings; accept either form.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  match IdRepr::deserialize(deserializer)? {
    IdRepr::Text(text) => text.trim().parse().map_err(de::Error::custom),
    IdRepr::Number(number) => Ok(number),
  }
}

/// One page of `search` results
#[derive(Debug, Deserialize)]
pub struct SearchResults {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
  pub total: usize,
}

/// Accumulates search pages in fetch order.
///
/// `total_available` comes from the first page and is never recomputed.
#[derive(Debug)]
pub struct IssuePage {
  issues: Vec<Issue>,
  total_available: usize,
}

impl IssuePage {
  pub fn new(first: SearchResults) -> Self {
    Self {
      total_available: first.total,
      issues: first.issues.into_iter().map(Issue::from).collect(),
    }
  }

  pub const fn total_available(&self) -> usize {
    self.total_available
  }

  pub fn issues(&self) -> &[Issue] {
    &self.issues
  }

  /// Append the issues of a later page, ignoring its reported total
  pub fn append(&mut self, page: SearchResults) {
    self.issues.extend(page.issues.into_iter().map(Issue::from));
  }

  pub fn into_issues(self) -> Vec<Issue> {
    self.issues
  }
}

/// A generic (id, name) pair: priorities, projects, custom fields, actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id: String,
  pub name: String,
}

impl Item {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      id: id.to_string(),
      name: name.to_string(),
    }
  }
}

/// Entry of the `field` listing
#[derive(Debug, Deserialize)]
pub struct JiraField {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub custom: bool,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<Item>,
}

/// The part of a field's edit metadata that decides the update body shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeDescriptor {
  pub type_tag: String,
  pub custom: Option<String>,
}

impl FieldTypeDescriptor {
  /// Extract the descriptor of `field_name` from an `editmeta` document.
  pub fn from_edit_metadata(edit_metadata: &serde_json::Value, field_name: &str) -> Result<Self> {
    let field = edit_metadata
      .get("fields")
      .and_then(|fields| fields.get(field_name))
      .filter(|field| !field.is_null())
      .ok_or_else(|| JiraError::MetadataMissing(field_name.to_string()))?;

    let schema = field.get("schema");
    let type_tag = schema
      .and_then(|schema| schema.get("type"))
      .and_then(|tag| tag.as_str())
      .ok_or_else(|| JiraError::MetadataTypeMissing(field_name.to_string()))?;

    let custom = schema
      .and_then(|schema| schema.get("custom"))
      .and_then(|custom| custom.as_str())
      .map(str::to_string);

    Ok(Self {
      type_tag: type_tag.to_string(),
      custom,
    })
  }

  pub fn is_array(&self) -> bool {
    self.type_tag == ARRAY_TYPE
  }

  pub fn is_multiselect(&self) -> bool {
    self.custom.as_deref() == Some(MULTISELECT_CUSTOM_TYPE)
  }
}

/// Comment creation payload
#[derive(Debug, Serialize)]
pub struct CommentRequest {
  pub body: String,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fields: Option<TransitionFields>,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Fields changed alongside a transition
#[derive(Debug, Serialize)]
pub struct TransitionFields {
  pub assignee: UserRef,
}

#[derive(Debug, Serialize)]
pub struct UserRef {
  pub name: String,
}

impl TransitionRequest {
  pub fn new(transition_id: &str, assignee: Option<&str>) -> Self {
    Self {
      transition: TransitionId {
        id: transition_id.to_string(),
      },
      fields: assignee.map(|name| TransitionFields {
        assignee: UserRef { name: name.to_string() },
      }),
    }
  }
}
