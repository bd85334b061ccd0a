//! Runtime data bindings.
//!
//! Callers bind the objects checks operate on (scenes, meshes, file lists...)
//! either under a check's own name, under a named key several checks share,
//! or as the shared default binding. The engine never inspects the values.
//!
//! Lookup order for a check: its own name, then its declared data key.
//! Only checks without a declared key fall back to the shared default.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::check::CheckData;

/// Key of the shared default binding.
pub const SHARED_KEY: &str = "*";

/// Mapping from binding key to caller-supplied data.
#[derive(Clone, Default)]
pub struct DataBindings {
    bindings: HashMap<String, Arc<CheckData>>,
}

impl DataBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `key` (a check name or a shared key).
    pub fn bind<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.bindings.insert(key.into(), Arc::new(value));
    }

    /// Builder-style [`DataBindings::bind`].
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.bind(key, value);
        self
    }

    /// Bind `value` as the default every check falls back to.
    pub fn shared<T>(value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::new().with(SHARED_KEY, value)
    }

    /// Get the binding stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<CheckData>> {
        self.bindings.get(key)
    }

    /// Find the binding for a check.
    pub fn lookup(&self, check: &str, data_key: Option<&str>) -> Option<&Arc<CheckData>> {
        self.bindings
            .get(check)
            .or_else(|| self.bindings.get(data_key.unwrap_or(SHARED_KEY)))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for DataBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.bindings.keys().collect();
        keys.sort();
        f.debug_struct("DataBindings").field("keys", &keys).finish()
    }
}
