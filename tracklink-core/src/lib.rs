//! # Tracklink Core Library
//!
//! Connection configuration, URL normalisation and terminal output helpers
//! shared by the tracklink connector and command-line tool.

pub mod config;
pub mod output;
pub mod url;

// Re-export main types
pub use config::{ConfigDirs, ConnectionConfig, ConnectionSettings, get_config_dirs};
pub use output::{print_error, print_info, print_success, print_warning, truncate_string};
