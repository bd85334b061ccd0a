//! List command implementation.
//!
//! The `assetcheck list` command lists registered checks in registry order.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::engine::{CheckDescriptor, CheckRegistry, Parameters, Severity};
use crate::error::Result;
use crate::ui::{Theme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

/// JSON shape of one listed check.
#[derive(Serialize)]
struct CheckListing<'a> {
    name: &'a str,
    title: &'a str,
    description: &'a str,
    message: &'a str,
    item_message: &'a str,
    version: &'a str,
    severity: Severity,
    enabled_by_default: bool,
    parameters: &'a Parameters,
}

impl<'a> From<&'a CheckDescriptor> for CheckListing<'a> {
    fn from(d: &'a CheckDescriptor) -> Self {
        Self {
            name: &d.name,
            title: &d.title,
            description: &d.description,
            message: &d.message,
            item_message: &d.item_message,
            version: &d.version,
            severity: d.default_severity,
            enabled_by_default: d.enabled_by_default,
            parameters: &d.default_parameters,
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn format_parameters(params: &Parameters) -> String {
        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = CheckRegistry::with_builtins()?;

        if self.args.json {
            let listings: Vec<CheckListing<'_>> = registry.iter().map(Into::into).collect();
            let json = serde_json::to_string_pretty(&listings).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = if ui.use_color() {
            Theme::new()
        } else {
            Theme::plain()
        };

        ui.message(&format!("  {}", theme.key.apply_to("Checks:")));
        for check in registry.iter() {
            let state = if check.enabled_by_default {
                "enabled"
            } else {
                "disabled"
            };
            ui.message(&format!(
                "    {} {}",
                theme.key.apply_to(&check.name),
                theme.dim.apply_to(format!("({}, {})", check.default_severity, state))
            ));
            ui.message(&format!("      {}", theme.dim.apply_to(&check.title)));
            if !check.default_parameters.is_empty() {
                ui.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("└── parameters:"),
                    theme.dim.apply_to(Self::format_parameters(&check.default_parameters))
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
