//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// gpu-doctor - Diagnose the NVIDIA driver, CUDA toolkit and ML framework stack.
#[derive(Debug, Parser)]
#[command(name = "gpu-doctor")]
#[command(
    author,
    version,
    about = "Diagnose the NVIDIA driver, CUDA toolkit and ML framework stack",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./gpu-doctor.yml)
    #[arg(short, long, global = true, env = "GPU_DOCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show probe details next to each result
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the summary and recommendations
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
    /// Run every probe and print recommendations (default if no command specified)
    Check(CheckArgs),

    /// List the probes without running them
    Probes,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print the report and recommendations as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
