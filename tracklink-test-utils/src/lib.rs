//! Test utilities shared across the tracklink workspace
//!
//! This crate provides common testing infrastructure including:
//! - A scripted Jira transport ([`ScriptedTransport`])
//! - XDG directory isolation ([`EnvTestGuard`])
//! - Single environment variable overrides ([`EnvVarGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod transport;

// Re-export commonly used items
pub use env::{EnvTestGuard, EnvVarGuard};
pub use transport::{ScriptedTransport, issue_json, search_page_json};
