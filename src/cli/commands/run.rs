//! Run command implementation.
//!
//! The `assetcheck run` command validates a scene file against the
//! configured checks and prints the report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::RunArgs;
use crate::config::{load_config, ProjectConfig};
use crate::engine::{
    CheckRegistry, CheckSpec, DataBindings, HumanWriter, JsonWriter, OutputFormat, Report,
    ReportWriter, RunnerOptions, SarifWriter, Severity, Strictness, Validator,
};
use crate::error::{AssetCheckError, Result};
use crate::geometry::load_scene;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code when an error-severity check failed.
pub const EXIT_VIOLATIONS: i32 = 1;
/// Exit code for setup and configuration problems.
pub const EXIT_SETUP: i32 = 2;
/// Exit code when only error-severity checks errored.
pub const EXIT_CHECK_FAULTS: i32 = 3;

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: None,
            args,
        }
    }

    /// Use an explicit config file instead of the discovered one.
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Build the check specification from config plus `--only`/`--skip`.
    fn build_spec(&self, config: &ProjectConfig, registry: &CheckRegistry) -> CheckSpec {
        let mut spec = config.effective_spec(registry);
        if !self.args.only.is_empty() {
            spec.isolate(&self.args.only);
        }
        spec.disable(&self.args.skip);
        spec
    }

    fn strictness(&self, config: &ProjectConfig) -> Strictness {
        if self.args.strict {
            Strictness::Strict
        } else {
            config.settings.strictness()
        }
    }

    fn runner_options(&self, config: &ProjectConfig) -> RunnerOptions {
        let settings = config.settings.runner_options();
        let timeout = self
            .args
            .timeout_ms
            .map(Duration::from_millis)
            .or(settings.timeout);
        settings
            .parallel(self.args.parallel || settings.parallel)
            .timeout(timeout)
    }

    fn render(&self, report: &Report, format: OutputFormat, ui: &dyn UserInterface) -> String {
        match format {
            OutputFormat::Human => HumanWriter::new(ui.use_color())
                .with_passed(ui.output_mode().shows_passed())
                .render(report),
            OutputFormat::Json => JsonWriter::new().render(report),
            OutputFormat::Sarif => {
                let mut writer = SarifWriter::new("assetcheck", env!("CARGO_PKG_VERSION"));
                if let Some(scene) = &self.args.scene {
                    writer = writer.with_artifact(scene.display().to_string());
                }
                writer.render(report)
            }
        }
    }

    /// Status lines on the diagnostic channel for machine-readable formats.
    fn report_status(&self, report: &Report, ui: &mut dyn UserInterface) {
        for warning in report.warnings() {
            ui.warning(&warning.message);
        }
        for message in report.messages(Severity::Error) {
            ui.error(&message);
        }
        let violations = report.results().iter().filter(|r| r.is_violation()).count();
        if violations == 0 {
            ui.success("No violations found");
        } else {
            ui.warning(&format!("{} check(s) reported violations", violations));
        }
    }
}

/// Exit code for a finished run.
pub fn exit_code(report: &Report) -> i32 {
    if report.has_error_failures() {
        EXIT_VIOLATIONS
    } else if report.has_error_faults() {
        EXIT_CHECK_FAULTS
    } else {
        0
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(&self.project_root, self.config.as_deref()) {
            Ok(c) => c,
            Err(
                e @ (AssetCheckError::ConfigNotFound { .. }
                | AssetCheckError::ConfigParseError { .. }),
            ) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_SETUP));
            }
            Err(e) => return Err(e),
        };

        let Some(scene_path) = &self.args.scene else {
            ui.error("No scene given. Pass one with --scene <file>.");
            return Ok(CommandResult::failure(EXIT_SETUP));
        };
        let scene = match load_scene(scene_path) {
            Ok(scene) => scene,
            Err(e @ AssetCheckError::SceneParseError { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_SETUP));
            }
            Err(AssetCheckError::Io(e)) => {
                ui.error(&format!("Cannot read scene {}: {}", scene_path.display(), e));
                return Ok(CommandResult::failure(EXIT_SETUP));
            }
            Err(e) => return Err(e),
        };

        let registry = CheckRegistry::with_builtins()?;
        let spec = self.build_spec(&config, &registry);
        let validator = Validator::new(&registry)
            .with_strictness(self.strictness(&config))
            .with_options(self.runner_options(&config));

        let report = match validator.validate(&spec, &DataBindings::shared(scene)) {
            Ok(report) => report,
            Err(e @ AssetCheckError::InvalidSpecification { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_SETUP));
            }
            Err(e) => return Err(e),
        };

        let format = self.args.format.unwrap_or(config.settings.default_format);
        let output = self.render(&report, format, ui);
        ui.message(output.trim_end());
        if format != OutputFormat::Human {
            self.report_status(&report, ui);
        }

        match exit_code(&report) {
            0 => Ok(CommandResult::success()),
            code => Ok(CommandResult::failure(code)),
        }
    }
}
