//! Probe result types.
//!
//! Every probe produces a tri-state [`ProbeResult`]. `Unknown` means the
//! question could not be asked (an optional prerequisite for testing is
//! missing), which calls for different advice than `Absent`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single environment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeResult {
    /// Checked and found working.
    Present,
    /// Checked and found missing or broken.
    Absent,
    /// Could not be checked.
    Unknown,
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeResult::Present => write!(f, "present"),
            ProbeResult::Absent => write!(f, "absent"),
            ProbeResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// Stable identifier of a registered probe.
///
/// Remediation rules refer to probes by these identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeId {
    DriverPresent,
    CompilerPresent,
    ToolkitDirPresent,
    LibrariesPresent,
    RuntimeRoundtrip,
    TorchCuda,
    TensorflowCuda,
}

impl ProbeId {
    /// All identifiers in registration order.
    pub const ALL: [ProbeId; 7] = [
        ProbeId::DriverPresent,
        ProbeId::CompilerPresent,
        ProbeId::ToolkitDirPresent,
        ProbeId::LibrariesPresent,
        ProbeId::RuntimeRoundtrip,
        ProbeId::TorchCuda,
        ProbeId::TensorflowCuda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeId::DriverPresent => "driver_present",
            ProbeId::CompilerPresent => "compiler_present",
            ProbeId::ToolkitDirPresent => "toolkit_dir_present",
            ProbeId::LibrariesPresent => "libraries_present",
            ProbeId::RuntimeRoundtrip => "runtime_roundtrip",
            ProbeId::TorchCuda => "torch_cuda",
            ProbeId::TensorflowCuda => "tensorflow_cuda",
        }
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a probe reports when it runs to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub result: ProbeResult,
    /// Advisory context (command output, paths checked).
    pub detail: String,
}

impl Observation {
    pub fn present(detail: impl Into<String>) -> Self {
        Self {
            result: ProbeResult::Present,
            detail: detail.into(),
        }
    }

    pub fn absent(detail: impl Into<String>) -> Self {
        Self {
            result: ProbeResult::Absent,
            detail: detail.into(),
        }
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self {
            result: ProbeResult::Unknown,
            detail: detail.into(),
        }
    }
}

/// A probe's entry in the diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub name: ProbeId,
    pub result: ProbeResult,
    pub detail: String,
}

impl ProbeOutcome {
    pub fn new(name: ProbeId, observation: Observation) -> Self {
        Self {
            name,
            result: observation.result,
            detail: observation.detail,
        }
    }
}
