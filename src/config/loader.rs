//! Configuration file discovery and loading.
//!
//! Lookup order:
//! 1. An explicit path (`--config` or `GPU_DOCTOR_CONFIG`), which must exist
//! 2. `gpu-doctor.yml` in the working directory
//! 3. Built-in defaults

use crate::config::schema::DoctorConfig;
use crate::error::{DoctorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gpu-doctor.yml";

/// Resolve which config file, if any, applies.
pub fn discover_config_path(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(DoctorError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(DEFAULT_CONFIG_FILE);
    Ok(local.is_file().then_some(local))
}

/// Parse a single config file.
pub fn load_config_file(path: &Path) -> Result<DoctorConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<DoctorConfig> {
    if content.trim().is_empty() {
        return Ok(DoctorConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DoctorError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the effective configuration.
///
/// Returns the parsed config together with the file it came from
/// (`None` when built-in defaults are used).
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<(DoctorConfig, Option<PathBuf>)> {
    match discover_config_path(explicit, cwd)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let config = load_config_file(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok((DoctorConfig::default(), None))
        }
    }
}
