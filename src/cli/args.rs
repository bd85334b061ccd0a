//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::OutputFormat;

/// assetcheck - Configurable validation checks for 3D assets.
#[derive(Debug, Parser)]
#[command(name = "assetcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .assetcheck/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a scene (default if no command specified)
    Run(RunArgs),

    /// List available checks
    List(ListArgs),

    /// Print the JSON Schema of the configuration file
    Schema,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Scene file to validate (YAML or JSON)
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Report format: human, json, sarif
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Fail on unknown checks and parameters
    #[arg(long)]
    pub strict: bool,

    /// Run checks concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Per-check timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Run only specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
