//! Report aggregation.
//!
//! [`ReportFormatter::format`] is a pure transform from raw results to a
//! [`Report`]: it never re-runs checks or alters results, it only counts
//! them and derives the verdict.
//!
//! The verdict only looks at `error`-severity checks. A `failed` or
//! `errored` error check makes it [`Verdict::ViolationsFound`]; warnings and
//! info checks are counted but never flip it.

use serde::Serialize;

use super::resolver::ConfigWarning;
use super::result::{CheckResult, CheckStatus};
use super::severity::Severity;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Clean,
    ViolationsFound,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Clean => write!(f, "clean"),
            Verdict::ViolationsFound => write!(f, "violations-found"),
        }
    }
}

/// Result counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl StatusCounts {
    fn record(&mut self, status: CheckStatus) {
        match status {
            CheckStatus::Passed => self.passed += 1,
            CheckStatus::Failed => self.failed += 1,
            CheckStatus::Errored => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }
}

/// Status counts for each severity, plus overall totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub error: StatusCounts,
    pub warning: StatusCounts,
    pub info: StatusCounts,
    pub total: StatusCounts,
}

impl Summary {
    /// Counts for one severity.
    pub fn for_severity(&self, severity: Severity) -> &StatusCounts {
        match severity {
            Severity::Error => &self.error,
            Severity::Warning => &self.warning,
            Severity::Info => &self.info,
        }
    }

    fn record(&mut self, result: &CheckResult) {
        let counts = match result.effective_severity {
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
        };
        counts.record(result.status);
        self.total.record(result.status);
    }
}

/// Normalized outcome of one validation run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    verdict: Verdict,
    summary: Summary,
    results: Vec<CheckResult>,
    warnings: Vec<ConfigWarning>,
}

impl Report {
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Results in registry order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Configuration warnings collected while resolving the specification.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.verdict == Verdict::Clean
    }

    /// Result for a check by name.
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Results with the given severity and status.
    pub fn filter(
        &self,
        severity: Severity,
        status: CheckStatus,
    ) -> impl Iterator<Item = &CheckResult> {
        self.results
            .iter()
            .filter(move |r| r.effective_severity == severity && r.status == status)
    }

    /// Whether any error-severity check genuinely failed.
    pub fn has_error_failures(&self) -> bool {
        self.summary.error.failed > 0
    }

    /// Whether any error-severity check could not complete.
    pub fn has_error_faults(&self) -> bool {
        self.summary.error.errored > 0
    }

    /// Failure messages of non-passing checks at `severity`, each followed by
    /// its offending items indented by two spaces.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.effective_severity == severity && r.is_violation())
            .map(|r| {
                let mut lines = vec![r.message.clone()];
                lines.extend(r.failure_lines());
                if let Some(error) = &r.error_message {
                    lines.push(format!("error: {}", error));
                }
                lines.join("\n  ")
            })
            .collect()
    }

    /// The report as a serializable mapping.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Builds [`Report`]s from raw runner output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `results` (in registry order) and `warnings` into a report.
    pub fn format(&self, results: Vec<CheckResult>, warnings: Vec<ConfigWarning>) -> Report {
        let mut summary = Summary::default();
        for result in &results {
            summary.record(result);
        }

        let verdict = if summary.error.failed > 0 || summary.error.errored > 0 {
            Verdict::ViolationsFound
        } else {
            Verdict::Clean
        };

        Report {
            verdict,
            summary,
            results,
            warnings,
        }
    }
}
