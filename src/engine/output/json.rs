//! JSON output writer.
//!
//! Writes reports as machine-readable JSON for tooling integration.

use std::io::Write;

use super::ReportWriter;
use crate::engine::Report;

/// Writes reports as JSON.
#[derive(Debug, Default)]
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    /// Create a new JSON writer producing indented output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit the report on a single line.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ReportWriter for JsonWriter {
    fn write<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report).map_err(std::io::Error::other)?;
        } else {
            serde_json::to_writer(&mut *writer, report).map_err(std::io::Error::other)?;
        }
        writeln!(writer)
    }
}
