//! Human-readable output writer.
//!
//! Renders reports for terminal display with optional color support.
//! Results are grouped by severity, most severe first, keeping registry
//! order within each group.

use std::io::Write;

use console::Style;

use super::ReportWriter;
use crate::engine::{CheckResult, CheckStatus, Report, Severity, Verdict};

/// Writes reports for human consumption.
pub struct HumanWriter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
    /// Whether to list passing checks as well.
    pub show_passed: bool,
}

impl HumanWriter {
    /// Create a new human writer.
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            show_passed: false,
        }
    }

    /// Also list checks that passed.
    pub fn with_passed(mut self, show_passed: bool) -> Self {
        self.show_passed = show_passed;
        self
    }

    fn style(&self, style: Style) -> Style {
        if self.use_color {
            style
        } else {
            Style::new()
        }
    }

    fn severity_style(&self, severity: Severity) -> Style {
        self.style(match severity {
            Severity::Error => Style::new().red().bold(),
            Severity::Warning => Style::new().color256(208),
            Severity::Info => Style::new().magenta(),
        })
    }

    fn write_result<W: Write>(&self, result: &CheckResult, writer: &mut W) -> std::io::Result<()> {
        let header = format!("{}[{}]", result.effective_severity, result.name);
        let header = self.severity_style(result.effective_severity).apply_to(header);

        match result.status {
            CheckStatus::Passed => {
                writeln!(writer, "{}: passed", header)?;
            }
            CheckStatus::Failed => {
                writeln!(writer, "{}: {}", header, result.message)?;
                for line in result.failure_lines() {
                    writeln!(writer, "  - {}", line)?;
                }
            }
            CheckStatus::Errored => {
                writeln!(writer, "{}: {}", header, result.message)?;
                if let Some(ref error) = result.error_message {
                    writeln!(
                        writer,
                        "   = {}: {}",
                        self.style(Style::new().dim()).apply_to("check errored"),
                        error
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl ReportWriter for HumanWriter {
    fn write<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        for severity in Severity::ALL {
            for result in report.results() {
                if result.effective_severity != severity
                    || (result.is_passed() && !self.show_passed)
                {
                    continue;
                }
                self.write_result(result, writer)?;
                writeln!(writer)?;
            }
        }

        for warning in report.warnings() {
            writeln!(
                writer,
                "{}: {}",
                self.style(Style::new().color256(208)).apply_to("config warning"),
                warning.message
            )?;
        }
        if !report.warnings().is_empty() {
            writeln!(writer)?;
        }

        // Summary
        let total = report.summary().total;
        writeln!(
            writer,
            "Ran {} check(s): {} passed, {} failed, {} errored",
            total.total(),
            total.passed,
            total.failed,
            total.errored
        )?;
        for severity in Severity::ALL {
            let counts = report.summary().for_severity(severity);
            if counts.total() == 0 {
                continue;
            }
            writeln!(
                writer,
                "  {}: {} passed, {} failed, {} errored",
                self.severity_style(severity).apply_to(severity),
                counts.passed,
                counts.failed,
                counts.errored
            )?;
        }

        let verdict = match report.verdict() {
            Verdict::Clean => self.style(Style::new().green()).apply_to("clean"),
            Verdict::ViolationsFound => self
                .style(Style::new().red().bold())
                .apply_to("violations-found"),
        };
        writeln!(writer, "Verdict: {}", verdict)?;

        Ok(())
    }
}
