//! Report renderers.
//!
//! This module provides writers for outputting reports in different
//! formats (human-readable, JSON, SARIF).

pub mod human;
pub mod json;
pub mod sarif;

use std::io::Write;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::report::Report;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Sarif,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Trait for rendering a report.
pub trait ReportWriter {
    /// Write `report` to the given writer.
    fn write<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()>;

    /// Render `report` into a string.
    fn render(&self, report: &Report) -> String {
        let mut output = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(report, &mut output);
        String::from_utf8_lossy(&output).into_owned()
    }
}

pub use human::HumanWriter;
pub use json::JsonWriter;
pub use sarif::SarifWriter;
