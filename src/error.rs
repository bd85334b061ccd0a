//! Error types for assetcheck operations.
//!
//! This module defines [`AssetCheckError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Registry and configuration errors are raised before any check runs and
//!   are fatal to the run.
//! - Faults raised while a single check executes never escape the runner;
//!   they become `errored` results. [`AssetCheckError::MissingData`] and
//!   [`AssetCheckError::Timeout`] exist so those results carry a uniform message.
//! - Check implementations report faults with `anyhow::Error`, which also
//!   converts into [`AssetCheckError::Other`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for assetcheck operations.
#[derive(Debug, Error)]
pub enum AssetCheckError {
    /// A check with the same name is already registered.
    #[error("Check '{name}' is already registered")]
    DuplicateCheck { name: String },

    /// Lookup of a check name that was never registered.
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    /// The check specification is malformed or references unknown checks
    /// or parameters (strict mode only).
    #[error("Invalid check specification: {message}")]
    InvalidSpecification { message: String },

    /// No data binding was supplied for a check that requires one.
    #[error("No data bound for check '{check}' (looked up '{key}')")]
    MissingData { check: String, key: String },

    /// A check did not finish within the configured timeout.
    #[error("Check '{check}' timed out after {elapsed:?}")]
    Timeout { check: String, elapsed: Duration },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a scene description.
    #[error("Failed to parse scene at {path}: {message}")]
    SceneParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for assetcheck operations.
pub type Result<T> = std::result::Result<T, AssetCheckError>;
