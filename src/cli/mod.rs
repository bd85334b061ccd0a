//! Command-line interface for assetcheck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ListArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
