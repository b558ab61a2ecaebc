//! # Lookup Lists
//!
//! Priorities, projects and custom fields, each reduced to [`Item`] pairs.

use crate::client::JiraConnector;
use crate::error::Result;
use crate::models::{Item, JiraField};
use crate::response::OperationKind;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> JiraConnector<T> {
  /// Get all issue priorities
  pub fn list_priorities(&self) -> Result<Vec<Item>> {
    self.list_items("priority")
  }

  /// Get all projects visible to the user
  pub fn list_projects(&self) -> Result<Vec<Item>> {
    self.list_items("project")
  }

  /// Get the custom fields of the instance; system fields are skipped
  pub fn list_custom_fields(&self) -> Result<Vec<Item>> {
    let fields: Vec<JiraField> = self
      .send(&ApiRequest::get("field"), OperationKind::Read)?
      .json()?;

    Ok(
      fields
        .into_iter()
        .filter(|field| field.custom)
        .map(|field| Item {
          id: field.id,
          name: field.name,
        })
        .collect(),
    )
  }

  fn list_items(&self, resource: &str) -> Result<Vec<Item>> {
    self.send(&ApiRequest::get(resource), OperationKind::Read)?.json()
  }
}
