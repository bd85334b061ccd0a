//! Check registration and execution engine.
//!
//! The engine turns a declarative [`CheckSpec`] into a validation run:
//!
//! - **Registry** - catalog of available checks ([`CheckRegistry`])
//! - **Resolver** - merges the specification with check defaults ([`Resolver`])
//! - **Runner** - executes each check with fault isolation ([`CheckRunner`])
//! - **Formatter** - aggregates results into a [`Report`] ([`ReportFormatter`])
//!
//! [`Validator`] wires the four together for the common case.
//!
//! # Example
//!
//! ```
//! use assetcheck::engine::{
//!     CheckData, CheckDescriptor, CheckRegistry, CheckSpec, CheckSpecEntry, DataBindings,
//!     Outcome, Parameters, Severity, Validator, Verdict,
//! };
//!
//! fn always_passes(_: &CheckData, _: &Parameters) -> anyhow::Result<Outcome> {
//!     Ok(Outcome::pass())
//! }
//!
//! let mut registry = CheckRegistry::new();
//! registry
//!     .register(
//!         CheckDescriptor::new("alwaysPasses", always_passes)
//!             .with_severity(Severity::Error)
//!             .without_data(),
//!     )
//!     .unwrap();
//!
//! let spec = CheckSpec::new().with("alwaysPasses", CheckSpecEntry::enabled());
//! let report = Validator::new(&registry)
//!     .validate(&spec, &DataBindings::new())
//!     .unwrap();
//! assert_eq!(report.verdict(), Verdict::Clean);
//! ```

pub mod bindings;
pub mod check;
pub mod descriptor;
pub mod output;
pub mod params;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod result;
pub mod runner;
pub mod severity;
pub mod spec;

pub use bindings::{DataBindings, SHARED_KEY};
pub use check::{downcast_data, Check, CheckData, Details, Outcome};
pub use descriptor::CheckDescriptor;
pub use output::{HumanWriter, JsonWriter, OutputFormat, ReportWriter, SarifWriter};
pub use params::Parameters;
pub use registry::CheckRegistry;
pub use report::{Report, ReportFormatter, StatusCounts, Summary, Verdict};
pub use resolver::{
    resolve, ConfigWarning, ExecutionPlan, ResolvedCheck, Resolver, Strictness, WarningKind,
};
pub use result::{CheckResult, CheckStatus, ItemFailure};
pub use runner::{CheckRunner, RunnerOptions};
pub use severity::Severity;
pub use spec::{CheckSpec, CheckSpecEntry};

use crate::error::Result;

/// One-call validation over a borrowed registry.
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r CheckRegistry,
    resolver: Resolver,
    runner: CheckRunner,
}

impl<'r> Validator<'r> {
    /// Lenient, sequential validator without timeouts.
    pub fn new(registry: &'r CheckRegistry) -> Self {
        Self {
            registry,
            resolver: Resolver::default(),
            runner: CheckRunner::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.resolver = Resolver::new(strictness);
        self
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.runner = CheckRunner::new(options);
        self
    }

    /// Resolve `spec`, run the plan against `bindings` and build the report.
    ///
    /// # Errors
    ///
    /// Only setup problems surface here (strict-mode specification errors).
    /// Faults inside individual checks are recorded in the report.
    pub fn validate(&self, spec: &CheckSpec, bindings: &DataBindings) -> Result<Report> {
        let plan = self.resolver.resolve(self.registry, spec)?;
        let results = self.runner.run(&plan.checks, bindings);
        let report = ReportFormatter::new().format(results, plan.warnings);

        let total = report.summary().total;
        tracing::info!(
            "Validation finished: {} passed, {} failed, {} errored ({})",
            total.passed,
            total.failed,
            total.errored,
            report.verdict()
        );
        Ok(report)
    }
}
