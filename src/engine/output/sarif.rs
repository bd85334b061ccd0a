//! SARIF output writer.
//!
//! SARIF (Static Analysis Results Interchange Format) is an OASIS standard
//! for static analysis tools, supported by GitHub, VS Code, and other tools.
//! Each failed or errored check becomes one SARIF result.

use std::io::Write;

use serde::Serialize;

use super::ReportWriter;
use crate::engine::{CheckStatus, Report, Severity};

/// SARIF version we generate.
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Writes reports as SARIF.
pub struct SarifWriter {
    /// Tool name to report.
    pub tool_name: String,
    /// Tool version to report.
    pub tool_version: String,
    /// Validated asset, attached to every result when set.
    pub artifact: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<SarifRuleProperties>,
}

#[derive(Serialize)]
struct SarifRuleProperties {
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    /// Always `none` for `review` results.
    level: &'static str,
    /// `fail` for genuine violations, `review` when the check itself errored.
    kind: &'static str,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

impl SarifWriter {
    /// Create a new SARIF writer.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            artifact: None,
        }
    }

    /// Attach the validated asset's path to every result.
    pub fn with_artifact(mut self, uri: impl Into<String>) -> Self {
        self.artifact = Some(uri.into());
        self
    }

    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl ReportWriter for SarifWriter {
    fn write<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let violations: Vec<_> = report.results().iter().filter(|r| r.is_violation()).collect();

        // Results are in registry order, so rule order is stable too.
        let rules: Vec<_> = violations
            .iter()
            .map(|r| SarifRule {
                id: r.name.clone(),
                short_description: SarifMessage {
                    text: r.message.clone(),
                },
                properties: (!r.version.is_empty()).then(|| SarifRuleProperties {
                    version: r.version.clone(),
                }),
            })
            .collect();

        let locations = || {
            self.artifact
                .iter()
                .map(|uri| SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation { uri: uri.clone() },
                    },
                })
                .collect::<Vec<_>>()
        };

        let results: Vec<_> = violations
            .iter()
            .map(|r| {
                let (kind, level, text) = match r.status {
                    CheckStatus::Errored => (
                        "review",
                        "none",
                        format!(
                            "{}: check errored: {}",
                            r.message,
                            r.error_message.as_deref().unwrap_or("unknown error")
                        ),
                    ),
                    _ => {
                        let items = r.failure_lines();
                        let text = if items.is_empty() {
                            r.message.clone()
                        } else {
                            format!("{}: {}", r.message, items.join(", "))
                        };
                        ("fail", Self::severity_to_level(r.effective_severity), text)
                    }
                };
                SarifResult {
                    rule_id: r.name.clone(),
                    level,
                    kind,
                    message: SarifMessage { text },
                    locations: locations(),
                }
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: self.tool_name.clone(),
                        version: self.tool_version.clone(),
                        rules,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(&mut *writer, &log).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
