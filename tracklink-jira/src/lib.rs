//! # Jira Connector
//!
//! Reads and mutates Jira issues over the REST API on behalf of an external
//! project-management tool: saved-filter listings with transparent paging,
//! type-aware field updates, comments, workflow transitions, and lookup lists.

pub mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;
pub mod response;
pub mod transport;
pub mod update;

// Re-export the connector
pub use client::JiraConnector;
pub use endpoints::search::additional_pages;
pub use error::{JiraError, Result};
// Re-export models
pub use models::{FieldTypeDescriptor, Issue, IssuePage, Item, JiraAuth};
pub use response::{OperationKind, ResponseClass, classify};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use update::FieldUpdate;
