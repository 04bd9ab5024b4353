//! The `gpu-doctor check` command.
//!
//! Runs every probe, prints the summary and the recommendations. Problems
//! found on the machine are reported, not returned as errors: the command
//! succeeds whenever the report could be produced.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::{self, DoctorConfig};
use crate::diagnosis::{
    diagnose, recommend, Aggregator, DiagnosticReport, RemediationBlock, RemedyContext,
};
use crate::error::Result;
use crate::probe::ProbeRegistry;
use crate::shell::ShellType;
use crate::ui::{ProbeProgress, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Shape of `check --json` output.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<&'a Path>,
    pub probes: &'a DiagnosticReport,
    pub recommendations: &'a [RemediationBlock],
}

/// The check command implementation.
pub struct CheckCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn run_json(&self, config: &DoctorConfig, source: Option<&Path>) -> Result<CommandResult> {
        let registry = ProbeRegistry::from_config(config);
        let report = diagnose(&registry);
        let blocks = recommend(&report, &RemedyContext::from_config(config, ShellType::current()));

        let json = serde_json::to_string_pretty(&JsonReport {
            generated_at: Utc::now(),
            config: source,
            probes: &report,
            recommendations: &blocks,
        })?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json).context("failed to write JSON report")?;
        Ok(CommandResult::success())
    }
}

/// Load the effective configuration and reject invalid values.
pub(super) fn load_checked_config(
    config_path: Option<&Path>,
    working_dir: &Path,
) -> Result<(DoctorConfig, Option<PathBuf>)> {
    let (config, source) = config::load_config(config_path, working_dir)?;
    config::validate(&config)?;
    Ok((config, source))
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, source) =
            load_checked_config(self.config_path.as_deref(), &self.working_dir)?;

        if self.args.json {
            return self.run_json(&config, source.as_deref());
        }

        ui.show_header("gpu-doctor");
        if ui.output_mode().shows_details() {
            match &source {
                Some(path) => ui.message(&format!("Using configuration from {}", path.display())),
                None => ui.message("Using built-in configuration"),
            }
        }

        let registry = ProbeRegistry::from_config(&config);
        let report = {
            let mut progress = ProbeProgress::new(ui);
            Aggregator::new(&registry).run(&mut progress)
        };
        ui.show_summary(&report);

        let ctx = RemedyContext::from_config(&config, ShellType::current());
        let blocks = recommend(&report, &ctx);
        ui.show_recommendations(&blocks);

        Ok(CommandResult::success())
    }
}
