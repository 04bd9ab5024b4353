//! The `gpu-doctor probes` command.
//!
//! Lists the configured probes in the order `check` runs them.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::probe::ProbeRegistry;
use crate::ui::UserInterface;

use super::check::load_checked_config;
use super::dispatcher::{Command, CommandResult};

/// The probes command implementation.
pub struct ProbesCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl ProbesCommand {
    /// Create a new probes command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
        }
    }
}

/// One `id  description` line per probe, ids aligned.
pub fn probe_lines(registry: &ProbeRegistry) -> Vec<String> {
    let width = registry
        .ids()
        .iter()
        .map(|id| id.as_str().len())
        .max()
        .unwrap_or(0);
    registry
        .iter()
        .map(|probe| {
            format!(
                "{:<width$}  {}",
                probe.id().as_str(),
                probe.description(),
                width = width
            )
        })
        .collect()
}

impl Command for ProbesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, _) = load_checked_config(self.config_path.as_deref(), &self.working_dir)?;
        let registry = ProbeRegistry::from_config(&config);

        for line in probe_lines(&registry) {
            ui.message(&line);
        }
        Ok(CommandResult::success())
    }
}
