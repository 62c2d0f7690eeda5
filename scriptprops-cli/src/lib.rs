//! scriptprops CLI library
//!
//! This library provides the command-line interface for corpus script
//! property analysis: argument handling, corpus metadata lookup and
//! rendering of analysis results.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
