//! Schema command implementation.
//!
//! The `assetcheck schema` command prints the JSON Schema of the
//! configuration file, for editor integration.

use crate::config::config_schema;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&config_schema());
        Ok(CommandResult::success())
    }
}
