//! # Field Update Bodies
//!
//! Jira accepts direct assignment for scalar fields but requires an update
//! operation envelope for array fields. Multiselect custom fields additionally
//! take their values as `{"value": ...}` objects.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::FieldTypeDescriptor;

/// Body of a `PUT issue/{issueIdOrKey}` that changes one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
  /// `{"fields": {field: value}}`
  Replace { field: String, value: String },
  /// `{"update": {field: [{"set": [value]}]}}`
  SetValues { field: String, value: String },
  /// `{"update": {field: [{"set": [{"value": value}]}]}}`
  SetOptions { field: String, value: String },
}

impl FieldUpdate {
  /// Pick the body shape for a field from its type descriptor.
  pub fn new(descriptor: &FieldTypeDescriptor, field: &str, value: &str) -> Self {
    let field = field.to_string();
    let value = value.to_string();

    if !descriptor.is_array() {
      Self::Replace { field, value }
    } else if descriptor.is_multiselect() {
      Self::SetOptions { field, value }
    } else {
      Self::SetValues { field, value }
    }
  }

  pub fn field(&self) -> &str {
    match self {
      Self::Replace { field, .. } | Self::SetValues { field, .. } | Self::SetOptions { field, .. } => field,
    }
  }
}

#[derive(Serialize)]
struct SetOperation<T> {
  set: [T; 1],
}

#[derive(Serialize)]
struct OptionValue<'a> {
  value: &'a str,
}

/// A JSON object with exactly one entry.
struct Entry<'a, V>(&'a str, V);

impl<V: Serialize> Serialize for Entry<'_, V> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(self.0, &self.1)?;
    map.end()
  }
}

impl Serialize for FieldUpdate {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Replace { field, value } => Entry("fields", Entry(field, value)).serialize(serializer),
      Self::SetValues { field, value } => Entry(
        "update",
        Entry(field, [SetOperation {
          set: [value.as_str()],
        }]),
      )
      .serialize(serializer),
      Self::SetOptions { field, value } => Entry(
        "update",
        Entry(field, [SetOperation {
          set: [OptionValue { value }],
        }]),
      )
      .serialize(serializer),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::consts::MULTISELECT_CUSTOM_TYPE;

  fn descriptor(type_tag: &str, custom: Option<&str>) -> FieldTypeDescriptor {
    FieldTypeDescriptor {
      type_tag: type_tag.to_string(),
      custom: custom.map(str::to_string),
    }
  }

  #[test]
  fn test_update_body_shapes() {
    let cases = [
      (
        descriptor("user", None),
        "assignee",
        "alice",
        json!({ "fields": { "assignee": "alice" } }),
      ),
      (
        descriptor("string", Some("com.atlassian.jira.plugin.system.customfieldtypes:textfield")),
        "customfield_10001",
        "text",
        json!({ "fields": { "customfield_10001": "text" } }),
      ),
      (
        descriptor("string", Some(MULTISELECT_CUSTOM_TYPE)),
        "customfield_10002",
        "odd",
        json!({ "fields": { "customfield_10002": "odd" } }),
      ),
      (
        descriptor("array", Some(MULTISELECT_CUSTOM_TYPE)),
        "customfield_10010",
        "Blue",
        json!({ "update": { "customfield_10010": [ { "set": [ { "value": "Blue" } ] } ] } }),
      ),
      (
        descriptor("array", None),
        "labels",
        "backend",
        json!({ "update": { "labels": [ { "set": [ "backend" ] } ] } }),
      ),
      (
        descriptor("array", Some("com.atlassian.jira.plugin.system.customfieldtypes:labels")),
        "customfield_10011",
        "ops",
        json!({ "update": { "customfield_10011": [ { "set": [ "ops" ] } ] } }),
      ),
    ];

    for (descriptor, field, value, expected) in cases {
      let update = FieldUpdate::new(&descriptor, field, value);
      assert_eq!(update.field(), field);
      assert_eq!(serde_json::to_value(&update).unwrap(), expected, "{descriptor:?}");
    }
  }

  #[test]
  fn test_update_variant_selection() {
    assert!(matches!(
      FieldUpdate::new(&descriptor("number", None), "storyPoints", "3"),
      FieldUpdate::Replace { .. }
    ));
    assert!(matches!(
      FieldUpdate::new(&descriptor("array", None), "components", "api"),
      FieldUpdate::SetValues { .. }
    ));
    assert!(matches!(
      FieldUpdate::new(&descriptor("array", Some(MULTISELECT_CUSTOM_TYPE)), "customfield_1", "x"),
      FieldUpdate::SetOptions { .. }
    ));
  }

  #[test]
  fn test_update_body_escapes_values() {
    let update = FieldUpdate::new(&descriptor("string", None), "summary", "quote \" and \\ slash");

    assert_eq!(
      serde_json::to_string(&update).unwrap(),
      r#"{"fields":{"summary":"quote \" and \\ slash"}}"#
    );
  }
}
