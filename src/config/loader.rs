//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the project directory in the correct priority order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_configs;
use crate::config::schema::ProjectConfig;
use crate::error::{AssetCheckError, Result};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".assetcheck";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.assetcheck/config.yml`, or the `--config` file)
/// 2. Local overrides (`.assetcheck/config.local.yml`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Project config
    pub project: Option<PathBuf>,

    /// Local overrides
    pub project_local: Option<PathBuf>,

    /// Whether `project` was named explicitly and must exist.
    pub explicit: bool,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
            explicit: false,
        }
    }

    /// Use `config` instead of the discovered project config. Local
    /// overrides are still layered on top.
    pub fn with_override(project_root: &Path, config: &Path) -> Self {
        Self {
            project: Some(config.to_path_buf()),
            explicit: true,
            ..Self::discover(project_root)
        }
    }

    /// Returns all config paths to load, in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(&self.project_local).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.assetcheck` directory, falling back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Parse YAML content into a [`ProjectConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProjectConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| AssetCheckError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(merge_configs(&[value]), source_path)
}

/// Load a config file as a raw YAML value (for merging).
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AssetCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AssetCheckError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| AssetCheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the config files in `paths`.
///
/// Without any config file the defaults are returned.
pub fn load_merged_config(paths: &ConfigPaths) -> Result<ProjectConfig> {
    let files = paths.all_existing();
    let Some(primary) = files.first() else {
        tracing::debug!("No configuration file found, using defaults");
        return Ok(ProjectConfig::default());
    };

    let mut configs = Vec::new();
    for path in &files {
        tracing::debug!("Loading configuration from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    from_value(merge_configs(&configs), primary)
}

/// Load config for a project with an optional explicit config file.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ProjectConfig> {
    let paths = match config_override {
        Some(config) => ConfigPaths::with_override(project_root, config),
        None => ConfigPaths::discover(project_root),
    };
    load_merged_config(&paths)
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<ProjectConfig> {
    serde_yaml::from_value(value).map_err(|e| AssetCheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{OutputFormat, Severity};
    use serde_json::json;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        temp
    }

    fn write(temp: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = temp.path().join(CONFIG_DIR).join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_finds_project_and_local_config() {
        let temp = project();
        write(&temp, "config.yml", "{}");
        write(&temp, "config.local.yml", "{}");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = project();
        let nested = temp.path().join("assets").join("chairs");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), temp.path());
    }

    #[test]
    fn find_project_root_falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        assert_eq!(find_project_root(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn empty_config_file_uses_defaults() {
        let temp = project();
        write(&temp, "config.yml", "");
        assert_eq!(
            load_config(temp.path(), None).unwrap(),
            ProjectConfig::default()
        );
    }

    #[test]
    fn local_overrides_project_config() {
        let temp = project();
        write(
            &temp,
            "config.yml",
            r#"
settings:
  default_format: json
checks:
  zeroAreaFaces:
    type: error
    parameters:
      threshold: 1.0e-10
  facetedGeometry:
    enabled: false
"#,
        );
        write(
            &temp,
            "config.local.yml",
            r#"
checks:
  zeroAreaFaces:
    parameters:
      threshold: 1.0e-5
  facetedGeometry: null
"#,
        );

        let config = load_config(temp.path(), None).unwrap();

        assert_eq!(config.settings.default_format, OutputFormat::Json);
        let entry = config.checks.get("zeroAreaFaces").unwrap();
        assert_eq!(entry.severity, Some(Severity::Error));
        assert_eq!(entry.parameters.get("threshold"), Some(&json!(1.0e-5)));
        assert!(config.checks.get("facetedGeometry").is_none());
    }

    #[test]
    fn explicit_config_replaces_project_config() {
        let temp = project();
        write(&temp, "config.yml", "settings:\n  parallel: true");
        let other = temp.path().join("ci.yml");
        fs::write(&other, "settings:\n  strict: true").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();

        assert!(config.settings.strict);
        assert!(!config.settings.parallel);
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, AssetCheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = project();
        write(&temp, "config.yml", "checks: [unclosed");

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, AssetCheckError::ConfigParseError { .. }));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let err = parse_config("chekcs: {}", Path::new("config.yml")).unwrap_err();
        assert!(err.to_string().contains("config.yml"));
    }
}
