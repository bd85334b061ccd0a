//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by the [`CommandDispatcher`].

pub mod dispatcher;
pub mod list;
pub mod run;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
