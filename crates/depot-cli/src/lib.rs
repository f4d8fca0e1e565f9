//! Depot tracker CLI library.
//!
//! This crate provides the CLI interface for the depot inventory tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ResetTarget};
pub use config::Config;
