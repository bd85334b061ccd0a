//! Configuration loading for assetcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Configuration File Locations
//!
//! Configuration is discovered and merged in this order:
//! 1. Project config (`.assetcheck/config.yml`, or the file given with `--config`)
//! 2. Local overrides (`.assetcheck/config.local.yml`)
//!
//! # Example
//!
//! ```
//! use assetcheck::config::load_config;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".assetcheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  parallel: true").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.settings.parallel);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    find_project_root, load_config, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{config_schema, ProjectConfig, Settings};
