//! gpu-doctor - Diagnose a machine's NVIDIA GPU compute stack.
//!
//! gpu-doctor runs a fixed set of probes against the driver, the CUDA
//! toolkit and optional ML frameworks, prints an OK / NOT-OK / NOT-TESTED
//! summary, and suggests copy-pasteable commands for whatever is missing.
//! It never changes the machine itself.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`diagnosis`] - Result aggregation, summary and recommendation engine
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Individual environment checks and the probe registry
//! - [`shell`] - External process execution and shell detection
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use gpu_doctor::diagnosis::{recommend, DiagnosticReport, RemedyContext, RemedyKind};
//! use gpu_doctor::probe::{ProbeId, ProbeResult};
//!
//! let report = DiagnosticReport::from_results([
//!     (ProbeId::DriverPresent, ProbeResult::Absent),
//!     (ProbeId::CompilerPresent, ProbeResult::Present),
//!     (ProbeId::ToolkitDirPresent, ProbeResult::Present),
//!     (ProbeId::LibrariesPresent, ProbeResult::Present),
//!     (ProbeId::RuntimeRoundtrip, ProbeResult::Absent),
//!     (ProbeId::TorchCuda, ProbeResult::Present),
//!     (ProbeId::TensorflowCuda, ProbeResult::Present),
//! ]);
//! let blocks = recommend(&report, &RemedyContext::default());
//! assert_eq!(blocks[0].kind, RemedyKind::DriverRepair);
//! ```

pub mod cli;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod probe;
pub mod shell;
pub mod ui;

pub use error::{DoctorError, Result};
