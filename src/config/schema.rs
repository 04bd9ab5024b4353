//! Configuration schema definitions for gpu-doctor.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file. Every field has a default, so an empty file (or no
//! file at all) describes a stock Linux CUDA installation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for gpu-doctor.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoctorConfig {
    /// Driver status tool
    pub driver: DriverConfig,

    /// CUDA compiler
    pub compiler: CompilerConfig,

    /// CUDA toolkit installation directory
    pub toolkit_dir: PathBuf,

    /// Shared libraries, any one of which satisfies the library probe
    pub library_paths: Vec<PathBuf>,

    /// Python interpreter used to import framework bindings
    pub python: String,

    /// Per-subprocess wall-clock budget
    pub timeout_secs: u64,

    /// Parent directory for the round-trip probe's scratch directory
    /// (defaults to the system temp dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    /// Install commands for optional ML frameworks
    pub frameworks: FrameworksConfig,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            compiler: CompilerConfig::default(),
            toolkit_dir: PathBuf::from("/usr/local/cuda"),
            library_paths: vec![
                PathBuf::from("/usr/local/cuda/lib64/libcudart.so"),
                PathBuf::from("/usr/lib/x86_64-linux-gnu/libcuda.so"),
                PathBuf::from("/usr/lib/x86_64-linux-gnu/libcudart.so"),
            ],
            python: "python3".to_string(),
            timeout_secs: 120,
            scratch_dir: None,
            frameworks: FrameworksConfig::default(),
        }
    }
}

impl DoctorConfig {
    /// Subprocess time budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Driver status tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Executable name or path
    pub command: String,

    /// Arguments (none by default)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            command: "nvidia-smi".to_string(),
            args: Vec::new(),
        }
    }
}

/// Compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Executable name or path
    pub command: String,

    /// Flag that prints the version and exits zero
    pub version_flag: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: "nvcc".to_string(),
            version_flag: "--version".to_string(),
        }
    }
}

/// Optional framework install commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworksConfig {
    pub torch: FrameworkConfig,
    pub tensorflow: FrameworkConfig,
}

impl Default for FrameworksConfig {
    fn default() -> Self {
        Self {
            torch: FrameworkConfig {
                install: vec![
                    "pip install torch torchvision torchaudio --index-url https://download.pytorch.org/whl/cu121"
                        .to_string(),
                ],
            },
            tensorflow: FrameworkConfig {
                install: vec!["pip install 'tensorflow[and-cuda]'".to_string()],
            },
        }
    }
}

/// Install commands for one framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworkConfig {
    /// Commands shown when the binding is not installed
    pub install: Vec<String>,
}
