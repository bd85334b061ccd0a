//! The check contract.
//!
//! A check is anything implementing [`Check`]: it receives the data bound to
//! it and its resolved parameters, and returns an [`Outcome`]. Returning an
//! `Err` (or panicking) is a fault of that check only; the runner turns it
//! into an `errored` result.

use std::any::Any;
use std::collections::BTreeMap;

use anyhow::anyhow;
use serde::Serialize;
use serde_json::Value;

use super::params::Parameters;

/// Data handed to a check. Opaque to the engine; checks downcast it.
pub type CheckData = dyn Any + Send + Sync;

/// Failure payload: offending entity reference mapped to a count or description.
pub type Details = BTreeMap<String, Value>;

/// Result of evaluating a check that ran to completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Whether no offending items were found.
    pub ok: bool,
    /// Offending items, present only when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl Outcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            ok: true,
            details: None,
        }
    }

    /// A failing outcome with the offending items.
    pub fn fail(details: Details) -> Self {
        Self {
            ok: false,
            details: Some(details),
        }
    }

    /// Pass when `details` is empty, fail with them otherwise.
    pub fn from_details(details: Details) -> Self {
        if details.is_empty() {
            Self::pass()
        } else {
            Self::fail(details)
        }
    }
}

/// A named, parameterized predicate over bound data.
///
/// Implementations must not rely on other checks having run, and must not
/// mutate shared state.
pub trait Check: Send + Sync {
    /// Evaluate the check against `data` with the resolved `params`.
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome>;
}

impl<F> Check for F
where
    F: Fn(&CheckData, &Parameters) -> anyhow::Result<Outcome> + Send + Sync,
{
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
        self(data, params)
    }
}

/// Downcast bound data to the type a check expects.
pub fn downcast_data<T: Any>(data: &CheckData) -> anyhow::Result<&T> {
    data.downcast_ref::<T>().ok_or_else(|| {
        anyhow!(
            "unexpected data shape: expected {}",
            std::any::type_name::<T>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_from_empty_details_passes() {
        assert_eq!(Outcome::from_details(Details::new()), Outcome::pass());
    }

    #[test]
    fn outcome_from_details_fails() {
        let mut details = Details::new();
        details.insert("Cube".into(), json!(2));
        let outcome = Outcome::from_details(details.clone());
        assert!(!outcome.ok);
        assert_eq!(outcome.details, Some(details));
    }

    #[test]
    fn closures_are_checks() {
        let check = |data: &CheckData, params: &Parameters| -> anyhow::Result<Outcome> {
            let value = downcast_data::<u32>(data)?;
            let limit = params.get_u64("limit")?;
            Ok(if u64::from(*value) > limit {
                Outcome::fail(Details::from([("value".to_string(), json!(value))]))
            } else {
                Outcome::pass()
            })
        };

        let params = Parameters::new().with("limit", 10);
        assert!(check.evaluate(&5u32, &params).unwrap().ok);
        assert!(!check.evaluate(&50u32, &params).unwrap().ok);
    }

    #[test]
    fn downcast_reports_unexpected_shape() {
        let err = downcast_data::<String>(&7u8).unwrap_err();
        assert!(err.to_string().contains("unexpected data shape"));
    }
}
