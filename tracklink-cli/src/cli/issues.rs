//! # Issue Commands
//!
//! Filter listings, single-issue views, field updates, comments and workflow
//! transitions.

#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;
use tracklink_core::output::{format_issue_key, format_or_dash, print_info, print_success, truncate_string};
use tracklink_jira::{Issue, JiraConnector, Transport};

use super::print_json;

#[derive(Tabled)]
struct IssueRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Type")]
  issue_type: String,
  #[tabled(rename = "Priority")]
  priority: String,
  #[tabled(rename = "Assignee")]
  assignee: String,
}

impl From<&Issue> for IssueRow {
  fn from(issue: &Issue) -> Self {
    Self {
      key: issue.key.clone(),
      summary: truncate_string(&issue.summary, 50),
      issue_type: issue.issue_type.clone(),
      priority: issue.priority.clone(),
      assignee: if issue.assignee.is_empty() {
        "Unassigned".to_string()
      } else {
        issue.assignee.clone()
      },
    }
  }
}

/// Render issues as a table
fn render_issue_table(issues: &[Issue]) -> String {
  let rows: Vec<IssueRow> = issues.iter().map(IssueRow::from).collect();
  Table::new(rows).with(Style::sharp()).to_string()
}

/// Render a single issue as a block of labelled lines
fn render_issue_details(issue: &Issue) -> String {
  let mut lines = vec![format!("{} {}", format_issue_key(&issue.key), issue.summary.bold())];

  for (label, value) in [
    ("Project", &issue.project),
    ("Type", &issue.issue_type),
    ("Priority", &issue.priority),
    ("Assignee", &issue.assignee),
  ] {
    lines.push(format!("  {:<10} {}", format!("{label}:"), format_or_dash(value)));
  }

  if !issue.description.is_empty() {
    lines.push(String::new());
    lines.extend(issue.description.lines().map(|line| format!("  {line}")));
  }

  lines.join("\n")
}

/// Handle `tracklink issues <FILTER_ID>`
pub(crate) fn handle_issues_command<T: Transport>(
  connector: &JiraConnector<T>,
  filter_id: &str,
  json: bool,
) -> Result<()> {
  let issues = connector
    .get_issues_by_filter(filter_id)
    .with_context(|| format!("Failed to load issues for filter {filter_id}"))?;
  info!(filter_id, count = issues.len(), "Loaded filter issues");

  if json {
    print_json(&issues);
  } else if issues.is_empty() {
    print_info(&format!("Filter {filter_id} matched no issues"));
  } else {
    println!("{}", render_issue_table(&issues));
    print_info(&format!("{} issue(s) in filter {filter_id}", issues.len()));
  }

  Ok(())
}

/// Handle `tracklink issue <KEY>`
pub(crate) fn handle_issue_command<T: Transport>(
  connector: &JiraConnector<T>,
  issue_key: &str,
  json: bool,
) -> Result<()> {
  let issue = connector
    .get_issue(issue_key)
    .with_context(|| format!("Failed to load issue {issue_key}"))?;

  if json {
    print_json(&issue);
  } else {
    println!("{}", render_issue_details(&issue));
  }

  Ok(())
}

/// Handle `tracklink update <KEY> <FIELD> <VALUE>`
pub(crate) fn handle_update_command<T: Transport>(
  connector: &JiraConnector<T>,
  issue_key: &str,
  field: &str,
  value: &str,
  json: bool,
) -> Result<()> {
  let issue = connector
    .update_issue_field(issue_key, field, value)
    .with_context(|| format!("Failed to set '{field}' on {issue_key}"))?;

  if json {
    print_json(&issue);
  } else {
    print_success(&format!("Updated '{field}' on {}", format_issue_key(issue_key)));
    println!("{}", render_issue_details(&issue));
  }

  Ok(())
}

/// Handle `tracklink comment <KEY> <TEXT>`
pub(crate) fn handle_comment_command<T: Transport>(
  connector: &JiraConnector<T>,
  issue_key: &str,
  text: &str,
) -> Result<()> {
  connector
    .add_comment(issue_key, text)
    .with_context(|| format!("Failed to comment on {issue_key}"))?;

  print_success(&format!("Added comment to {}", format_issue_key(issue_key)));
  Ok(())
}

/// Handle `tracklink transition <KEY> <TRANSITION_ID>`
pub(crate) fn handle_transition_command<T: Transport>(
  connector: &JiraConnector<T>,
  issue_key: &str,
  transition_id: &str,
  assignee: Option<&str>,
) -> Result<()> {
  connector
    .progress_workflow(issue_key, transition_id, assignee)
    .with_context(|| format!("Failed to apply transition {transition_id} to {issue_key}"))?;

  match assignee {
    Some(name) => print_success(&format!(
      "Applied transition {transition_id} to {} and assigned it to {name}",
      format_issue_key(issue_key)
    )),
    None => print_success(&format!(
      "Applied transition {transition_id} to {}",
      format_issue_key(issue_key)
    )),
  }

  Ok(())
}
