//! # Tracklink CLI Library
//!
//! Command definitions and connector construction for the tracklink
//! command-line tool.

pub mod cli;
pub mod clients;
