//! Check specifications.
//!
//! A [`CheckSpec`] says, per check name, whether the check runs, at which
//! severity, and with which parameter overrides:
//!
//! ```yaml
//! zeroAreaFaces:
//!   enabled: true
//!   type: error
//!   parameters:
//!     threshold: 1.0e-5
//! facetedGeometry:
//!   enabled: false
//! ```

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::Parameters;
use super::severity::Severity;

/// Per-check configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CheckSpecEntry {
    /// Whether the check runs. Falls back to the check's default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Severity override.
    #[serde(
        default,
        rename = "type",
        alias = "severity",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<Severity>,

    /// Parameter overrides, layered over the check's defaults.
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

impl CheckSpecEntry {
    /// An explicitly enabled entry.
    pub fn enabled() -> Self {
        Self {
            enabled: Some(true),
            ..Default::default()
        }
    }

    /// An explicitly disabled entry.
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Default::default()
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key, value);
        self
    }
}

/// Mapping from check name to its configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CheckSpec(BTreeMap<String, CheckSpecEntry>);

impl CheckSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, entry: CheckSpecEntry) -> Self {
        self.insert(name, entry);
        self
    }

    /// Set the entry for a check, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, entry: CheckSpecEntry) {
        self.0.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CheckSpecEntry> {
        self.0.get(name)
    }

    /// Iterate over `(name, entry)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CheckSpecEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enable the named checks, adding entries for ones not yet configured.
    pub fn enable<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.0.entry(name.as_ref().to_string()).or_default().enabled = Some(true);
        }
    }

    /// Disable the named checks.
    pub fn disable<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.0.entry(name.as_ref().to_string()).or_default().enabled = Some(false);
        }
    }

    /// Enable the named checks and disable every other configured one.
    pub fn isolate<S: AsRef<str>>(&mut self, names: &[S]) {
        for (name, entry) in self.0.iter_mut() {
            if !names.iter().any(|n| n.as_ref() == name) {
                entry.enabled = Some(false);
            }
        }
        self.enable(names);
    }
}

impl<K: Into<String>> FromIterator<(K, CheckSpecEntry)> for CheckSpec {
    fn from_iter<I: IntoIterator<Item = (K, CheckSpecEntry)>>(iter: I) -> Self {
        CheckSpec(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
