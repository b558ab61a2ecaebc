//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the tracklink tool.

mod config;
mod issues;
mod lookups;
mod validate;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracklink_core::config::{ENV_JIRA_API_TOKEN, ENV_JIRA_USER};
use tracklink_core::output::{print_error, print_warning};
use tracklink_jira::JiraError;

use crate::clients::create_jira_connector;

/// Top-level CLI command for the tracklink tool
#[derive(Parser, Debug)]
#[command(name = "tracklink")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Read and update Jira issues from the command line")]
#[command(
  long_about = "Tracklink talks to a Jira server on behalf of a project-management tool.\n\n\
        It lists the issues of saved filters, updates fields with type-aware values,\n\
        adds comments, moves issues through their workflow and lists lookup values."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightBlue.on_default().bold().underline())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::BrightBlue.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Print results as JSON instead of tables
  #[arg(long, global = true)]
  pub json: bool,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the tracklink tool
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Check that the configured credential is accepted by Jira
  #[command(long_about = "Check that the configured user can be looked up with the configured credential.\n\n\
            Exits with a non-zero status when Jira rejects the credential or cannot be reached.")]
  Validate,

  /// List every issue matched by a saved filter
  #[command(long_about = "List every issue matched by a saved Jira filter.\n\n\
            Results are fetched page by page until the total reported by the first page\n\
            has been retrieved.")]
  Issues {
    /// The saved filter id
    #[arg(required = true, index = 1)]
    filter_id: String,
  },

  /// Show a single issue
  Issue {
    /// The Jira issue key (e.g., PROJ-123)
    #[arg(required = true, index = 1)]
    issue_key: String,
  },

  /// Set a field of an issue
  #[command(long_about = "Set a field of an issue to a value.\n\n\
            The field type is read from the issue's edit metadata so array and multiselect\n\
            fields receive the shape Jira expects. The updated issue is printed afterwards.")]
  Update {
    /// The Jira issue key (e.g., PROJ-123)
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// The field id (e.g., priority, labels, customfield_10010)
    #[arg(required = true, index = 2)]
    field: String,

    /// The new value
    #[arg(required = true, index = 3)]
    value: String,
  },

  /// Add a comment to an issue
  Comment {
    /// The Jira issue key (e.g., PROJ-123)
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// The comment text
    #[arg(required = true, index = 2)]
    text: String,
  },

  /// Move an issue through its workflow
  #[command(long_about = "Apply a workflow transition to an issue.\n\n\
            Use 'tracklink actions <KEY>' to list the transitions currently available.")]
  Transition {
    /// The Jira issue key (e.g., PROJ-123)
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// The transition id
    #[arg(required = true, index = 2)]
    transition_id: String,

    /// Reassign the issue to this user as part of the transition
    #[arg(long, value_name = "NAME")]
    assignee: Option<String>,
  },

  /// List the workflow transitions available for an issue
  Actions {
    /// The Jira issue key (e.g., PROJ-123)
    #[arg(required = true, index = 1)]
    issue_key: String,
  },

  /// List custom fields
  CustomFields,

  /// List issue priorities
  Priorities,

  /// List projects
  Projects,

  /// Show or change the stored connection settings
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  let json = cli.json;

  let result = match cli.command {
    Commands::Config(args) => config::handle_config_command(args, json),
    Commands::Validate => validate::handle_validate_command(&create_jira_connector()?, json),
    Commands::Issues { filter_id } => issues::handle_issues_command(&create_jira_connector()?, &filter_id, json),
    Commands::Issue { issue_key } => issues::handle_issue_command(&create_jira_connector()?, &issue_key, json),
    Commands::Update {
      issue_key,
      field,
      value,
    } => issues::handle_update_command(&create_jira_connector()?, &issue_key, &field, &value, json),
    Commands::Comment { issue_key, text } => {
      issues::handle_comment_command(&create_jira_connector()?, &issue_key, &text)
    }
    Commands::Transition {
      issue_key,
      transition_id,
      assignee,
    } => issues::handle_transition_command(
      &create_jira_connector()?,
      &issue_key,
      &transition_id,
      assignee.as_deref(),
    ),
    Commands::Actions { issue_key } => lookups::handle_actions_command(&create_jira_connector()?, &issue_key, json),
    Commands::CustomFields => lookups::handle_custom_fields_command(&create_jira_connector()?, json),
    Commands::Priorities => lookups::handle_priorities_command(&create_jira_connector()?, json),
    Commands::Projects => lookups::handle_projects_command(&create_jira_connector()?, json),
  };

  if let Err(err) = &result
    && is_auth_failure(err)
  {
    print_warning(&format!(
      "Jira rejected the credential. Check '{ENV_JIRA_USER}' and '{ENV_JIRA_API_TOKEN}'."
    ));
  }

  result
}

/// Whether `err` was caused by Jira rejecting the credential
fn is_auth_failure(err: &anyhow::Error) -> bool {
  err.downcast_ref::<JiraError>().is_some_and(JiraError::is_auth_failure)
}

/// Print `value` as pretty JSON
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) {
  match serde_json::to_string_pretty(value) {
    Ok(json) => println!("{json}"),
    Err(e) => print_error(&format!("Failed to serialize output: {e}")),
  }
}

#[cfg(test)]
mod tests {
  use anyhow::Context;
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_issues() {
    let cli = Cli::try_parse_from(["tracklink", "-vv", "issues", "10100"]).unwrap();

    assert_eq!(cli.verbose, 2);
    assert!(!cli.json);
    assert!(matches!(cli.command, Commands::Issues { filter_id } if filter_id == "10100"));
  }

  #[test]
  fn test_parse_json_after_subcommand() {
    let cli = Cli::try_parse_from(["tracklink", "priorities", "--json"]).unwrap();

    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Priorities));
  }

  #[test]
  fn test_parse_update() {
    let cli = Cli::try_parse_from(["tracklink", "update", "PROJ-5", "labels", "backend"]).unwrap();

    match cli.command {
      Commands::Update {
        issue_key,
        field,
        value,
      } => {
        assert_eq!(issue_key, "PROJ-5");
        assert_eq!(field, "labels");
        assert_eq!(value, "backend");
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn test_parse_transition_with_assignee() {
    let cli = Cli::try_parse_from(["tracklink", "transition", "PROJ-5", "31", "--assignee", "alice"]).unwrap();

    match cli.command {
      Commands::Transition {
        issue_key,
        transition_id,
        assignee,
      } => {
        assert_eq!(issue_key, "PROJ-5");
        assert_eq!(transition_id, "31");
        assert_eq!(assignee.as_deref(), Some("alice"));
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn test_parse_kebab_case_subcommand() {
    let cli = Cli::try_parse_from(["tracklink", "custom-fields"]).unwrap();

    assert!(matches!(cli.command, Commands::CustomFields));
  }

  #[test]
  fn test_parse_requires_arguments() {
    assert!(Cli::try_parse_from(["tracklink"]).is_err());
    assert!(Cli::try_parse_from(["tracklink", "comment", "PROJ-5"]).is_err());
    assert!(Cli::try_parse_from(["tracklink", "update", "PROJ-5", "labels"]).is_err());
  }

  #[test]
  fn test_is_auth_failure_sees_through_context() {
    let err = Err::<(), _>(JiraError::Unauthorized)
      .context("Failed to list priorities")
      .unwrap_err();
    assert!(is_auth_failure(&err));

    let err = anyhow::anyhow!("something else");
    assert!(!is_auth_failure(&err));
  }
}
