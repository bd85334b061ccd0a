//! Check execution.
//!
//! The [`CheckRunner`] executes an [`ExecutionPlan`](super::ExecutionPlan)
//! against caller-supplied [`DataBindings`] and produces one [`CheckResult`]
//! per planned check, in plan order.
//!
//! # Fault isolation
//!
//! Every invocation goes through a single capture point. An `Err` returned by
//! the check, a panic inside it, a missing binding, or an expired timeout all
//! become an `errored` result for that check; the run always continues with
//! the next check.
//!
//! # Concurrency
//!
//! With [`RunnerOptions::parallel`] checks are evaluated on the rayon pool.
//! The indexed collect keeps results in plan order, so parallel and
//! sequential runs return identical vectors.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::bindings::DataBindings;
use super::check::{Check, CheckData, Outcome};
use super::params::Parameters;
use super::resolver::ResolvedCheck;
use super::result::CheckResult;
use crate::error::AssetCheckError;

/// Runner configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Evaluate independent checks concurrently.
    pub parallel: bool,
    /// Upper bound for a single check; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl RunnerOptions {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Executes resolved checks with per-check fault isolation.
#[derive(Debug, Clone, Default)]
pub struct CheckRunner {
    options: RunnerOptions,
}

impl CheckRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RunnerOptions {
        self.options
    }

    /// Run every check and return results in the order of `checks`.
    pub fn run(&self, checks: &[ResolvedCheck<'_>], bindings: &DataBindings) -> Vec<CheckResult> {
        let started = Instant::now();
        let results: Vec<CheckResult> = if self.options.parallel {
            checks
                .par_iter()
                .map(|check| self.run_one(check, bindings))
                .collect()
        } else {
            checks
                .iter()
                .map(|check| self.run_one(check, bindings))
                .collect()
        };
        tracing::debug!(
            "Ran {} check(s) in {:?}",
            results.len(),
            started.elapsed()
        );
        results
    }

    /// Run a single check. Never panics.
    pub fn run_one(&self, check: &ResolvedCheck<'_>, bindings: &DataBindings) -> CheckResult {
        let descriptor = check.descriptor;
        let name = descriptor.name.as_str();
        let severity = check.effective_severity;

        let data: Arc<CheckData> = match bindings.lookup(name, descriptor.data_key.as_deref()) {
            Some(data) => Arc::clone(data),
            None if descriptor.requires_data => {
                let err = AssetCheckError::MissingData {
                    check: name.to_string(),
                    key: descriptor
                        .data_key
                        .clone()
                        .unwrap_or_else(|| name.to_string()),
                };
                tracing::warn!("{}", err);
                return CheckResult::errored(name, severity, &descriptor.message, err.to_string())
                    .with_version(&descriptor.version);
            }
            None => Arc::new(()),
        };

        tracing::debug!("Running check '{}'", name);
        let started = Instant::now();
        let evaluation = match self.options.timeout {
            Some(timeout) => evaluate_with_timeout(
                name,
                Arc::clone(&descriptor.implementation),
                data,
                check.effective_parameters.clone(),
                timeout,
            ),
            None => evaluate_isolated(
                descriptor.implementation.as_ref(),
                data.as_ref(),
                &check.effective_parameters,
            ),
        };

        match evaluation {
            Ok(outcome) => {
                tracing::debug!(
                    "Check '{}' {} in {:?}",
                    name,
                    if outcome.ok { "passed" } else { "failed" },
                    started.elapsed()
                );
                CheckResult::from_outcome(name, severity, &descriptor.message, outcome)
                    .with_item_messages(&descriptor.item_message, &check.effective_parameters)
                    .with_version(&descriptor.version)
            }
            Err(message) => {
                tracing::warn!("Check '{}' errored: {}", name, message);
                CheckResult::errored(name, severity, &descriptor.message, message)
                    .with_version(&descriptor.version)
            }
        }
    }
}

/// Invoke a check, converting returned errors and panics into a message.
fn evaluate_isolated(
    check: &dyn Check,
    data: &CheckData,
    params: &Parameters,
) -> Result<Outcome, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| check.evaluate(data, params))) {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(format!("{:#}", err)),
        Err(payload) => Err(format!(
            "check panicked: {}",
            panic_payload_to_string(payload.as_ref())
        )),
    }
}

/// Invoke a check on its own thread and stop waiting after `timeout`.
///
/// A check that overruns keeps its thread until it returns; its late
/// result is dropped with the channel.
fn evaluate_with_timeout(
    name: &str,
    check: Arc<dyn Check>,
    data: Arc<CheckData>,
    params: Parameters,
    timeout: Duration,
) -> Result<Outcome, String> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name(format!("check-{}", name))
        .spawn(move || {
            let _ = tx.send(evaluate_isolated(check.as_ref(), data.as_ref(), &params));
        })
        .map_err(|e| format!("failed to start check thread: {}", e))?;

    match rx.recv_timeout(timeout) {
        Ok(evaluation) => evaluation,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(AssetCheckError::Timeout {
            check: name.to_string(),
            elapsed: timeout,
        }
        .to_string()),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err("check thread exited without a result".to_string())
        }
    }
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
