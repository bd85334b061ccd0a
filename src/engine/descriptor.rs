//! Registry entries.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::check::Check;
use super::params::Parameters;
use super::severity::Severity;

/// Metadata and implementation of a registered check.
///
/// Built with the `with_*` methods:
///
/// ```
/// use assetcheck::engine::{CheckData, CheckDescriptor, Outcome, Parameters, Severity};
///
/// let descriptor = CheckDescriptor::new(
///     "alwaysPasses",
///     |_: &CheckData, _: &Parameters| -> anyhow::Result<Outcome> { Ok(Outcome::pass()) },
/// )
/// .with_severity(Severity::Error)
/// .with_parameter("threshold", 1e-10);
///
/// assert_eq!(descriptor.name, "alwaysPasses");
/// assert_eq!(descriptor.default_severity, Severity::Error);
/// ```
#[derive(Clone)]
pub struct CheckDescriptor {
    /// Unique identifier, e.g. `zeroAreaFaces`.
    pub name: String,
    /// Short human-readable title.
    pub title: String,
    /// What the check verifies.
    pub description: String,
    /// User-facing message shown when the check fails.
    pub message: String,
    /// Per-item message template; see [`CheckResult::with_item_messages`].
    ///
    /// [`CheckResult::with_item_messages`]: super::CheckResult::with_item_messages
    pub item_message: String,
    /// Check version, bumped when its behavior changes.
    pub version: String,
    /// Severity used when the specification does not override it.
    pub default_severity: Severity,
    /// Whether a specification entry without `enabled` runs this check.
    pub enabled_by_default: bool,
    /// Parameter defaults; also the set of recognised parameter names.
    pub default_parameters: Parameters,
    /// Binding key to look up when no binding exists under the check's name.
    pub data_key: Option<String>,
    /// Whether a missing binding is an error for this check.
    pub requires_data: bool,
    /// The check itself.
    pub implementation: Arc<dyn Check>,
}

impl CheckDescriptor {
    /// Create a descriptor with warning severity, enabled by default,
    /// no parameters, reading the shared binding.
    pub fn new(name: impl Into<String>, implementation: impl Check + 'static) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            message: name.clone(),
            item_message: "{item}: {found}".to_string(),
            version: "0.0.0".to_string(),
            name,
            description: String::new(),
            default_severity: Severity::Warning,
            enabled_by_default: true,
            default_parameters: Parameters::new(),
            data_key: None,
            requires_data: true,
            implementation: Arc::new(implementation),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the per-item message template.
    pub fn with_item_message(mut self, template: impl Into<String>) -> Self {
        self.item_message = template.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }

    /// Declare a parameter and its default value.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_parameters.insert(key, value);
        self
    }

    /// Read data from `key` when nothing is bound under the check's own name.
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    /// Mark the check as not needing any bound data.
    pub fn without_data(mut self) -> Self {
        self.requires_data = false;
        self
    }
}

impl fmt::Debug for CheckDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDescriptor")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("default_severity", &self.default_severity)
            .field("enabled_by_default", &self.enabled_by_default)
            .field("default_parameters", &self.default_parameters)
            .field("data_key", &self.data_key)
            .field("requires_data", &self.requires_data)
            .finish_non_exhaustive()
    }
}
