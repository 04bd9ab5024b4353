//! Environment probes.
//!
//! A probe answers one question about the machine ("does the driver tool
//! run?", "does the toolkit directory exist?") with a tri-state result.
//!
//! # Modules
//!
//! - [`result`] - Tri-state result, probe identifiers and outcomes
//! - [`command`] - Probes that run an executable and check its exit code
//! - [`filesystem`] - Probes that check for paths
//! - [`roundtrip`] - Compile-and-run probe for the whole toolchain
//! - [`framework`] - Optional ML framework probes
//! - [`registry`] - Ordered set of probes for one run
//!
//! # Contract
//!
//! Execution failures of the thing being checked are reported as
//! `Absent` inside the returned [`Observation`]. An `Err` means the probe
//! could not make its attempt at all; the aggregator turns it into
//! `Unknown`.

pub mod command;
pub mod filesystem;
pub mod framework;
pub mod registry;
pub mod result;
pub mod roundtrip;

#[cfg(all(test, unix))]
pub(crate) mod testing;

pub use command::CommandProbe;
pub use filesystem::{AnyPathProbe, DirectoryProbe};
pub use framework::{Framework, FrameworkProbe};
pub use registry::ProbeRegistry;
pub use result::{Observation, ProbeId, ProbeOutcome, ProbeResult};
pub use roundtrip::RoundtripProbe;

use crate::error::Result;

/// A single environment check.
pub trait Probe {
    /// Stable identifier used by remediation rules.
    fn id(&self) -> ProbeId;

    /// One-line description for progress output.
    fn description(&self) -> &str;

    /// Run the check once.
    fn run(&self) -> Result<Observation>;
}
