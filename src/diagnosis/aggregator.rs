//! Result aggregation.
//!
//! Runs every registered probe exactly once, in order, on the calling
//! thread. A failing probe never stops the run: errors and panics are
//! recorded as `Unknown` with the failure text as detail.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::probe::{Observation, Probe, ProbeOutcome, ProbeRegistry};

use super::DiagnosticReport;

/// Receives progress notifications while probes run.
///
/// Presentation only; the report is the aggregator's sole output.
pub trait ProbeObserver {
    /// Called before `probe` runs. `index` is zero-based.
    fn probe_started(&mut self, _index: usize, _total: usize, _probe: &dyn Probe) {}

    /// Called after a probe's outcome is recorded.
    fn probe_finished(&mut self, _outcome: &ProbeOutcome) {}
}

/// Observer that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {}

/// Runs a registry's probes and builds the report.
pub struct Aggregator<'a> {
    registry: &'a ProbeRegistry,
}

impl<'a> Aggregator<'a> {
    pub fn new(registry: &'a ProbeRegistry) -> Self {
        Self { registry }
    }

    /// Run all probes and return the completed report.
    pub fn run(&self, observer: &mut dyn ProbeObserver) -> DiagnosticReport {
        let total = self.registry.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, probe) in self.registry.iter().enumerate() {
            observer.probe_started(index, total, probe);
            tracing::debug!(probe = %probe.id(), "running probe");

            let outcome = ProbeOutcome::new(probe.id(), run_probe(probe));
            tracing::debug!(
                probe = %outcome.name,
                result = %outcome.result,
                detail = %outcome.detail,
                "probe finished"
            );

            observer.probe_finished(&outcome);
            outcomes.push(outcome);
        }

        DiagnosticReport::from_outcomes(outcomes)
    }
}

/// Run all probes in `registry` without progress output.
pub fn diagnose(registry: &ProbeRegistry) -> DiagnosticReport {
    Aggregator::new(registry).run(&mut NoopObserver)
}

fn run_probe(probe: &dyn Probe) -> Observation {
    match panic::catch_unwind(AssertUnwindSafe(|| probe.run())) {
        Ok(Ok(observation)) => observation,
        Ok(Err(e)) => {
            tracing::warn!(probe = %probe.id(), error = %e, "probe could not run");
            Observation::unknown(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(probe = %probe.id(), panic = %message, "probe panicked");
            Observation::unknown(format!("probe panicked: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
