//! Configuration validation rules.
//!
//! - Executables and the Python interpreter must be named
//! - The toolkit directory and library paths must be absolute
//! - At least one library path must be listed
//! - The timeout must be positive
//! - Every framework must have at least one install command

use crate::config::schema::DoctorConfig;
use crate::error::{DoctorError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every violation rather than stopping at the first one.
pub fn validate_config(config: &DoctorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("driver.command", &config.driver.command),
        ("compiler.command", &config.compiler.command),
        ("python", &config.python),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    if !config.toolkit_dir.is_absolute() {
        errors.push(ValidationError::new(
            "toolkit_dir",
            format!("must be an absolute path, got '{}'", config.toolkit_dir.display()),
        ));
    }

    if config.library_paths.is_empty() {
        errors.push(ValidationError::new(
            "library_paths",
            "must list at least one library",
        ));
    }
    for path in config.library_paths.iter().filter(|p| !p.is_absolute()) {
        errors.push(ValidationError::new(
            "library_paths",
            format!("must be absolute paths, got '{}'", path.display()),
        ));
    }

    if config.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "timeout_secs",
            "must be greater than zero",
        ));
    }

    for (field, framework) in [
        ("frameworks.torch.install", &config.frameworks.torch),
        ("frameworks.tensorflow.install", &config.frameworks.tensorflow),
    ] {
        if framework.install.is_empty() {
            errors.push(ValidationError::new(
                field,
                "must list at least one command",
            ));
        }
    }

    errors
}

/// Validate and fold all errors into a single `ConfigValidationError`.
pub fn validate(config: &DoctorConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(DoctorError::ConfigValidationError { message })
}
