//! Check registry.
//!
//! The [`CheckRegistry`] catalogs every available check by name, in
//! registration order. It is populated once during start-up by check
//! providers (see [`CheckRegistry::with_builtins`]) and then handed to the
//! resolver and runner by shared reference, which keeps it read-only for
//! the duration of a run.

use std::collections::HashMap;

use super::descriptor::CheckDescriptor;
use crate::error::{AssetCheckError, Result};

/// Registry of all available checks.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    descriptors: Vec<CheckDescriptor>,
    index: HashMap<String, usize>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in check providers registered.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCheck` if two providers declare the same name.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        crate::geometry::register_geometry_checks(&mut registry)?;
        Ok(registry)
    }

    /// Register a check.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCheck` if a check with the same name exists.
    pub fn register(&mut self, descriptor: CheckDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(AssetCheckError::DuplicateCheck {
                name: descriptor.name,
            });
        }
        tracing::debug!("Registered check '{}'", descriptor.name);
        self.index
            .insert(descriptor.name.clone(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Get a check by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCheck` if no check has that name.
    pub fn get(&self, name: &str) -> Result<&CheckDescriptor> {
        self.index
            .get(name)
            .map(|&i| &self.descriptors[i])
            .ok_or_else(|| AssetCheckError::UnknownCheck {
                name: name.to_string(),
            })
    }

    /// Whether a check with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over all checks in registration order.
    ///
    /// Each call starts a fresh iteration.
    pub fn iter(&self) -> impl Iterator<Item = &CheckDescriptor> {
        self.descriptors.iter()
    }

    /// Names of all checks in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }

    /// Registration position of a check.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
