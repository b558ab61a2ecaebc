//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by Jira resource: saved-filter search,
//! issues, comments, workflow transitions, and lookup lists.

pub mod comments;
pub mod issues;
pub mod lookups;
pub mod search;
pub mod transitions;
