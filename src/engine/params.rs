//! Check parameters.
//!
//! [`Parameters`] is an ordered map from parameter name to a JSON value.
//! Defaults live on the check descriptor; the specification may override a
//! subset of them. Merging is shallow: an override replaces the whole value
//! stored under its key.

use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named parameter values for a check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Value>);

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Parameter names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: start from `self` and overlay every key of `overrides`.
    ///
    /// On conflict the override wins.
    pub fn merged_with(&self, overrides: &Parameters) -> Parameters {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        Parameters(merged)
    }

    /// Read a numeric parameter as `f64`.
    pub fn get_f64(&self, key: &str) -> anyhow::Result<f64> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| anyhow!("parameter '{}' must be a number", key))
    }

    /// Read a non-negative integer parameter.
    pub fn get_u64(&self, key: &str) -> anyhow::Result<u64> {
        let value = self.require(key)?;
        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        // YAML authors often write `90000.0`; accept integral floats.
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            _ => Err(anyhow!(
                "parameter '{}' must be a non-negative integer",
                key
            )),
        }
    }

    /// Read a boolean parameter.
    pub fn get_bool(&self, key: &str) -> anyhow::Result<bool> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| anyhow!("parameter '{}' must be a boolean", key))
    }

    fn require(&self, key: &str) -> anyhow::Result<&Value> {
        self.get(key)
            .with_context(|| format!("missing parameter '{}'", key))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_is_left_biased_toward_overrides() {
        let defaults = Parameters::new().with("a", 1).with("b", 2);
        let overrides = Parameters::new().with("b", 3);

        let merged = defaults.merged_with(&overrides);

        assert_eq!(merged.get("a"), Some(&json!(1)));
        assert_eq!(merged.get("b"), Some(&json!(3)));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_shallow() {
        let defaults = Parameters::new().with("limits", json!({"min": 1, "max": 5}));
        let overrides = Parameters::new().with("limits", json!({"max": 9}));

        let merged = defaults.merged_with(&overrides);

        assert_eq!(merged.get("limits"), Some(&json!({"max": 9})));
    }

    #[test]
    fn merge_keeps_override_only_keys() {
        let merged = Parameters::new().merged_with(&Parameters::new().with("extra", true));
        assert!(merged.contains_key("extra"));
    }

    #[test]
    fn typed_getters() {
        let params = Parameters::new()
            .with("threshold", 1e-5)
            .with("count", 90000)
            .with("strict", true)
            .with("name", "x");

        assert_eq!(params.get_f64("threshold").unwrap(), 1e-5);
        assert_eq!(params.get_f64("count").unwrap(), 90000.0);
        assert_eq!(params.get_u64("count").unwrap(), 90000);
        assert!(params.get_bool("strict").unwrap());
        assert!(params.get_f64("name").is_err());
        assert!(params.get_u64("missing").is_err());
    }

    #[test]
    fn get_u64_accepts_integral_floats() {
        let params = Parameters::new().with("n", 12.0).with("m", 1.5);
        assert_eq!(params.get_u64("n").unwrap(), 12);
        assert!(params.get_u64("m").is_err());
    }

    #[test]
    fn deserializes_from_yaml_mapping() {
        let params: Parameters = serde_yaml::from_str("threshold: 1.0e-5\nlimit: 3").unwrap();
        assert_eq!(params.get_f64("threshold").unwrap(), 1.0e-5);
        assert_eq!(params.get_u64("limit").unwrap(), 3);
    }

    #[test]
    fn collects_from_pairs() {
        let params: Parameters = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
