//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use gpu_doctor::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("gpu-doctor.yml"), "toolkit_dir: /opt/cuda").unwrap();
//!
//! let (config, _source) = load_config(None, temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.toolkit_dir, std::path::PathBuf::from("/opt/cuda"));
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{discover_config_path, load_config, load_config_file, DEFAULT_CONFIG_FILE};
pub use schema::{CompilerConfig, DoctorConfig, DriverConfig, FrameworkConfig, FrameworksConfig};
pub use validator::{validate, validate_config, ValidationError};
