//! # Lookup Commands
//!
//! Lists of (id, name) pairs: workflow actions, custom fields, priorities and
//! projects.

#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracklink_core::output::{format_issue_key, print_info};
use tracklink_jira::{Item, JiraConnector, Transport};

use super::print_json;

#[derive(Tabled)]
struct ItemRow {
  #[tabled(rename = "ID")]
  id: String,
  #[tabled(rename = "Name")]
  name: String,
}

/// Render items as a two-column table
fn render_item_table(items: &[Item]) -> String {
  let rows: Vec<ItemRow> = items
    .iter()
    .map(|item| ItemRow {
      id: item.id.clone(),
      name: item.name.clone(),
    })
    .collect();

  Table::new(rows).with(Style::sharp()).to_string()
}

fn print_items(items: &[Item], what: &str, json: bool) {
  if json {
    print_json(items);
  } else if items.is_empty() {
    print_info(&format!("No {what} found"));
  } else {
    println!("{}", render_item_table(items));
  }
}

/// Handle `tracklink actions <KEY>`
pub(crate) fn handle_actions_command<T: Transport>(
  connector: &JiraConnector<T>,
  issue_key: &str,
  json: bool,
) -> Result<()> {
  let actions = connector
    .list_available_actions(issue_key)
    .with_context(|| format!("Failed to list transitions for {issue_key}"))?;

  print_items(
    &actions,
    &format!("transitions available for {}", format_issue_key(issue_key)),
    json,
  );
  Ok(())
}

/// Handle `tracklink custom-fields`
pub(crate) fn handle_custom_fields_command<T: Transport>(connector: &JiraConnector<T>, json: bool) -> Result<()> {
  let fields = connector
    .list_custom_fields()
    .context("Failed to list custom fields")?;

  print_items(&fields, "custom fields", json);
  Ok(())
}

/// Handle `tracklink priorities`
pub(crate) fn handle_priorities_command<T: Transport>(connector: &JiraConnector<T>, json: bool) -> Result<()> {
  let priorities = connector.list_priorities().context("Failed to list priorities")?;

  print_items(&priorities, "priorities", json);
  Ok(())
}

/// Handle `tracklink projects`
pub(crate) fn handle_projects_command<T: Transport>(connector: &JiraConnector<T>, json: bool) -> Result<()> {
  let projects = connector.list_projects().context("Failed to list projects")?;

  print_items(&projects, "projects", json);
  Ok(())
}
