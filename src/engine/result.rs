//! Per-check results.

use serde::Serialize;
use serde_json::Value;

use super::check::{Details, Outcome};
use super::params::Parameters;
use super::severity::Severity;

/// Final status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Ran to completion and found nothing.
    Passed,
    /// Ran to completion and found offending items.
    Failed,
    /// Could not complete: the check faulted, panicked, timed out, or had no data.
    Errored,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Passed => write!(f, "passed"),
            CheckStatus::Failed => write!(f, "failed"),
            CheckStatus::Errored => write!(f, "errored"),
        }
    }
}

/// One offending item of a failed check, with its rendered message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFailure {
    pub item: String,
    pub found: Value,
    pub message: String,
}

/// Result of running one resolved check. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub effective_severity: Severity,
    pub status: CheckStatus,
    /// User-facing failure message of the check.
    pub message: String,
    /// Offending items; present only when `status` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<Details>,
    /// Fault description; present only when `status` is `errored`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Per-item messages rendered from `failure_detail`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemFailure>,
    /// Version of the check that produced this result.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl CheckResult {
    /// Build a result from a completed evaluation.
    pub fn from_outcome(
        name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        let (status, failure_detail) = if outcome.ok {
            (CheckStatus::Passed, None)
        } else {
            // A failing outcome without details still reports a (empty) payload.
            (
                CheckStatus::Failed,
                Some(outcome.details.unwrap_or_default()),
            )
        };
        Self {
            name: name.into(),
            effective_severity: severity,
            status,
            message: message.into(),
            failure_detail,
            error_message: None,
            items: Vec::new(),
            version: String::new(),
        }
    }

    /// Build a result for a check that could not complete.
    pub fn errored(
        name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            effective_severity: severity,
            status: CheckStatus::Errored,
            message: message.into(),
            failure_detail: None,
            error_message: Some(error.into()),
            items: Vec::new(),
            version: String::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Render one message per offending item from `template`.
    ///
    /// `{item}` and `{found}` expand to the detail key and value; any other
    /// placeholder naming a parameter expands to that parameter's value.
    pub fn with_item_messages(mut self, template: &str, params: &Parameters) -> Self {
        self.items = self
            .failure_detail
            .iter()
            .flatten()
            .map(|(item, found)| ItemFailure {
                message: render_item_message(template, item, found, params),
                item: item.clone(),
                found: found.clone(),
            })
            .collect();
        self
    }

    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }

    /// Failed or errored.
    pub fn is_violation(&self) -> bool {
        self.status != CheckStatus::Passed
    }

    /// Human-readable lines describing the offending items.
    ///
    /// Rendered item messages when present, `item: value` otherwise.
    pub fn failure_lines(&self) -> Vec<String> {
        if !self.items.is_empty() {
            return self.items.iter().map(|i| i.message.clone()).collect();
        }
        self.failure_detail
            .iter()
            .flatten()
            .map(|(item, value)| format!("{}: {}", item, value_text(value)))
            .collect()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Unknown placeholders are kept verbatim.
fn render_item_message(template: &str, item: &str, found: &Value, params: &Parameters) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];
        let Some(close) = rest.find('}') else {
            break;
        };
        let key = &rest[1..close];
        match key {
            "item" => out.push_str(item),
            "found" => out.push_str(&value_text(found)),
            _ => match params.get(key) {
                Some(value) => out.push_str(&value_text(value)),
                None => out.push_str(&rest[..=close]),
            },
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}
