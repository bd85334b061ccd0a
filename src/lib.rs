//! assetcheck - Configurable validation checks for 3D assets.
//!
//! assetcheck runs a declarative set of named checks against a scene and
//! aggregates the outcomes into a report with a pass/fail verdict. Checks
//! are registered once, selected and tuned per run by a specification, and
//! isolated from each other so that one faulty check never aborts the rest.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration discovery, loading and merging
//! - [`engine`] - Check registry, resolver, runner and reports
//! - [`error`] - Error types and result aliases
//! - [`geometry`] - Scene model and built-in geometry checks
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use assetcheck::engine::{CheckRegistry, CheckSpec, CheckSpecEntry, DataBindings, Validator};
//! use assetcheck::geometry::{Face, MeshObject, Scene};
//!
//! let registry = CheckRegistry::with_builtins().unwrap();
//! let sliver = MeshObject::new(
//!     "Sliver",
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
//!     vec![Face::flat([0, 1, 2])],
//! );
//! let spec = CheckSpec::new().with("zeroAreaFaces", CheckSpecEntry::enabled());
//!
//! let report = Validator::new(&registry)
//!     .validate(&spec, &DataBindings::shared(Scene::new(vec![sliver])))
//!     .unwrap();
//! assert!(!report.is_clean());
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod ui;

pub use error::{AssetCheckError, Result};
