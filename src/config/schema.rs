//! Configuration schema definitions.
//!
//! These structs map to `.assetcheck/config.yml`. The JSON Schema printed by
//! `assetcheck schema` is derived from them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::{CheckRegistry, CheckSpec, OutputFormat, RunnerOptions, Strictness};
use std::time::Duration;

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Run settings
    pub settings: Settings,

    /// Per-check overrides keyed by check name
    pub checks: CheckSpec,
}

/// Settings that apply to every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fail on unknown checks and parameters instead of warning
    pub strict: bool,

    /// Run checks concurrently
    pub parallel: bool,

    /// Per-check timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Report format used when `--format` is not given
    pub default_format: OutputFormat,
}

impl Settings {
    pub fn strictness(&self) -> Strictness {
        if self.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions::default()
            .parallel(self.parallel)
            .timeout(self.timeout_ms.map(Duration::from_millis))
    }
}

impl ProjectConfig {
    /// Specification covering every registered check.
    ///
    /// Checks without a configured entry get an empty one, so they run
    /// when enabled by default. Configured entries are kept as written,
    /// including ones naming unknown checks.
    pub fn effective_spec(&self, registry: &CheckRegistry) -> CheckSpec {
        let mut spec = self.checks.clone();
        for name in registry.names() {
            if spec.get(name).is_none() {
                spec.insert(name, Default::default());
            }
        }
        spec
    }
}

/// JSON Schema for the configuration file, pretty-printed.
pub fn config_schema() -> String {
    let schema = schemars::schema_for!(ProjectConfig);
    // Schemas are plain JSON trees and always serialize.
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
