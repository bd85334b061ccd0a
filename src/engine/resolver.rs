//! Specification resolution.
//!
//! Resolution merges each enabled specification entry with its registry
//! descriptor and yields an [`ExecutionPlan`] in registry order, so the
//! order of the specification never influences the order of results.
//!
//! Entries that reference unknown checks, or parameters a check does not
//! declare, are handled according to [`Strictness`]:
//!
//! - [`Strictness::Lenient`] (default) records a [`ConfigWarning`] and skips them.
//! - [`Strictness::Strict`] fails the whole resolution with `InvalidSpecification`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::descriptor::CheckDescriptor;
use super::params::Parameters;
use super::registry::CheckRegistry;
use super::severity::Severity;
use super::spec::{CheckSpec, CheckSpecEntry};
use crate::error::{AssetCheckError, Result};

/// How to treat specification entries the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Warn and skip.
    #[default]
    Lenient,
    /// Fail resolution.
    Strict,
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("unknown strictness: {}", s)),
        }
    }
}

/// Kind of configuration problem found during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The specification names a check that is not registered.
    UnknownCheck,
    /// The specification overrides a parameter the check does not declare.
    UnknownParameter { parameter: String },
}

/// A non-fatal configuration problem, carried into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    /// Check name as written in the specification.
    pub check: String,
    #[serde(flatten)]
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
}

impl ConfigWarning {
    fn unknown_check(check: &str) -> Self {
        Self {
            check: check.to_string(),
            kind: WarningKind::UnknownCheck,
            message: format!("unknown check '{}' ignored", check),
        }
    }

    fn unknown_parameter(check: &str, parameter: &str) -> Self {
        Self {
            check: check.to_string(),
            kind: WarningKind::UnknownParameter {
                parameter: parameter.to_string(),
            },
            message: format!(
                "unknown parameter '{}' for check '{}' ignored",
                parameter, check
            ),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A check merged with its specification entry, ready to run.
#[derive(Debug, Clone)]
pub struct ResolvedCheck<'r> {
    /// The registry entry this check was resolved from.
    pub descriptor: &'r CheckDescriptor,
    /// Specification override, or the descriptor default.
    pub effective_severity: Severity,
    /// Descriptor defaults overlaid with specification parameters.
    pub effective_parameters: Parameters,
}

impl ResolvedCheck<'_> {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Ordered checks to run plus the warnings produced while resolving them.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan<'r> {
    pub checks: Vec<ResolvedCheck<'r>>,
    pub warnings: Vec<ConfigWarning>,
}

impl ExecutionPlan<'_> {
    /// Names of the planned checks, in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Turns a [`CheckSpec`] into an [`ExecutionPlan`] against a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    strictness: Strictness,
}

impl Resolver {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Resolve `spec` against `registry`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `InvalidSpecification` listing every unknown
    /// check and parameter reference.
    pub fn resolve<'r>(
        &self,
        registry: &'r CheckRegistry,
        spec: &CheckSpec,
    ) -> Result<ExecutionPlan<'r>> {
        let warnings = self.validate(registry, spec)?;

        let mut checks = Vec::new();
        for descriptor in registry.iter() {
            let Some(entry) = spec.get(&descriptor.name) else {
                continue;
            };
            if !entry.enabled.unwrap_or(descriptor.enabled_by_default) {
                tracing::debug!("Check '{}' disabled by specification", descriptor.name);
                continue;
            }
            checks.push(resolve_entry(descriptor, entry));
        }

        tracing::debug!(
            "Resolved {} check(s) with {} warning(s)",
            checks.len(),
            warnings.len()
        );
        Ok(ExecutionPlan { checks, warnings })
    }

    fn validate(&self, registry: &CheckRegistry, spec: &CheckSpec) -> Result<Vec<ConfigWarning>> {
        let mut problems = Vec::new();
        for (name, entry) in spec.iter() {
            match registry.get(name) {
                Ok(descriptor) => {
                    for key in entry.parameters.keys() {
                        if !descriptor.default_parameters.contains_key(key) {
                            problems.push(ConfigWarning::unknown_parameter(name, key));
                        }
                    }
                }
                Err(_) => problems.push(ConfigWarning::unknown_check(name)),
            }
        }

        if self.strictness == Strictness::Strict && !problems.is_empty() {
            let message = problems
                .iter()
                .map(|p| p.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AssetCheckError::InvalidSpecification { message });
        }

        for problem in &problems {
            tracing::warn!("{}", problem);
        }
        Ok(problems)
    }
}

/// Resolve with the default (lenient) policy.
pub fn resolve<'r>(registry: &'r CheckRegistry, spec: &CheckSpec) -> Result<ExecutionPlan<'r>> {
    Resolver::default().resolve(registry, spec)
}

fn resolve_entry<'r>(descriptor: &'r CheckDescriptor, entry: &CheckSpecEntry) -> ResolvedCheck<'r> {
    // Unknown keys were either rejected (strict) or reported (lenient).
    let overrides: Parameters = entry
        .parameters
        .iter()
        .filter(|(key, _)| descriptor.default_parameters.contains_key(key))
        .map(|(key, value)| (key, value.clone()))
        .collect();

    ResolvedCheck {
        descriptor,
        effective_severity: entry.severity.unwrap_or(descriptor.default_severity),
        effective_parameters: descriptor.default_parameters.merged_with(&overrides),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CheckData, Outcome};
    use serde_json::json;

    fn noop(_: &CheckData, _: &Parameters) -> anyhow::Result<Outcome> {
        Ok(Outcome::pass())
    }

    fn registry() -> CheckRegistry {
        let mut registry = CheckRegistry::new();
        registry
            .register(
                CheckDescriptor::new("zeroAreaFaces", noop)
                    .with_severity(Severity::Error)
                    .with_parameter("threshold", 1e-10),
            )
            .unwrap();
        registry
            .register(CheckDescriptor::new("facetedGeometry", noop))
            .unwrap();
        registry
            .register(
                CheckDescriptor::new("merge", noop)
                    .with_parameter("a", 1)
                    .with_parameter("b", 2),
            )
            .unwrap();
        registry
            .register(CheckDescriptor::new("offByDefault", noop).enabled_by_default(false))
            .unwrap();
        registry
    }

    #[test]
    fn resolves_only_enabled_entries() {
        let registry = registry();
        let spec = CheckSpec::new()
            .with(
                "zeroAreaFaces",
                CheckSpecEntry::enabled().with_parameter("threshold", 1e-5),
            )
            .with("facetedGeometry", CheckSpecEntry::disabled());

        let plan = resolve(&registry, &spec).unwrap();

        assert_eq!(plan.names(), vec!["zeroAreaFaces"]);
        let zero = &plan.checks[0];
        assert_eq!(zero.effective_severity, Severity::Error);
        assert_eq!(zero.effective_parameters.get_f64("threshold").unwrap(), 1e-5);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn preserves_registry_order() {
        let registry = registry();
        let spec = CheckSpec::new()
            .with("merge", CheckSpecEntry::enabled())
            .with("facetedGeometry", CheckSpecEntry::enabled())
            .with("zeroAreaFaces", CheckSpecEntry::enabled());

        let plan = resolve(&registry, &spec).unwrap();

        assert_eq!(
            plan.names(),
            vec!["zeroAreaFaces", "facetedGeometry", "merge"]
        );
    }

    #[test]
    fn merges_parameters_left_biased_to_spec() {
        let registry = registry();
        let spec = CheckSpec::new().with("merge", CheckSpecEntry::enabled().with_parameter("b", 3));

        let plan = resolve(&registry, &spec).unwrap();

        let params = &plan.checks[0].effective_parameters;
        assert_eq!(params.get("a"), Some(&json!(1)));
        assert_eq!(params.get("b"), Some(&json!(3)));
    }

    #[test]
    fn severity_override_wins() {
        let registry = registry();
        let spec = CheckSpec::new().with(
            "zeroAreaFaces",
            CheckSpecEntry::enabled().with_severity(Severity::Info),
        );

        let plan = resolve(&registry, &spec).unwrap();

        assert_eq!(plan.checks[0].effective_severity, Severity::Info);
    }

    #[test]
    fn omitted_enabled_uses_descriptor_default() {
        let registry = registry();
        let spec = CheckSpec::new()
            .with("facetedGeometry", CheckSpecEntry::default())
            .with("offByDefault", CheckSpecEntry::default());

        let plan = resolve(&registry, &spec).unwrap();

        assert_eq!(plan.names(), vec!["facetedGeometry"]);
    }

    #[test]
    fn lenient_mode_warns_on_unknown_check() {
        let registry = registry();
        let spec = CheckSpec::new()
            .with("foo", CheckSpecEntry::enabled())
            .with("facetedGeometry", CheckSpecEntry::enabled());

        let plan = Resolver::new(Strictness::Lenient)
            .resolve(&registry, &spec)
            .unwrap();

        assert_eq!(plan.names(), vec!["facetedGeometry"]);
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].check, "foo");
        assert_eq!(plan.warnings[0].kind, WarningKind::UnknownCheck);
    }

    #[test]
    fn lenient_mode_drops_unknown_parameters() {
        let registry = registry();
        let spec = CheckSpec::new().with(
            "zeroAreaFaces",
            CheckSpecEntry::enabled()
                .with_parameter("threshold", 1e-3)
                .with_parameter("bogus", 1),
        );

        let plan = resolve(&registry, &spec).unwrap();

        let params = &plan.checks[0].effective_parameters;
        assert!(!params.contains_key("bogus"));
        assert_eq!(params.get_f64("threshold").unwrap(), 1e-3);
        assert_eq!(
            plan.warnings[0].kind,
            WarningKind::UnknownParameter {
                parameter: "bogus".to_string()
            }
        );
    }

    #[test]
    fn strict_mode_rejects_unknown_check() {
        let registry = registry();
        let spec = CheckSpec::new().with("foo", CheckSpecEntry::enabled());

        let err = Resolver::new(Strictness::Strict)
            .resolve(&registry, &spec)
            .unwrap_err();

        assert!(matches!(err, AssetCheckError::InvalidSpecification { .. }));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn strict_mode_rejects_unknown_parameter() {
        let registry = registry();
        let spec = CheckSpec::new().with(
            "facetedGeometry",
            CheckSpecEntry::enabled().with_parameter("angle", 30),
        );

        let err = Resolver::new(Strictness::Strict)
            .resolve(&registry, &spec)
            .unwrap_err();

        assert!(err.to_string().contains("angle"));
    }

    #[test]
    fn strict_mode_accepts_valid_spec() {
        let registry = registry();
        let spec = CheckSpec::new().with("merge", CheckSpecEntry::enabled().with_parameter("a", 5));

        let plan = Resolver::new(Strictness::Strict)
            .resolve(&registry, &spec)
            .unwrap();

        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn strictness_from_str() {
        assert_eq!("STRICT".parse::<Strictness>(), Ok(Strictness::Strict));
        assert_eq!("lenient".parse::<Strictness>(), Ok(Strictness::Lenient));
        assert!("loose".parse::<Strictness>().is_err());
    }
}
