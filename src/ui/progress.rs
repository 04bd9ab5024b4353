//! Per-probe progress display.

use crate::diagnosis::{Marker, ProbeObserver};
use crate::probe::{Probe, ProbeOutcome, ProbeResult};

use super::{SpinnerHandle, UserInterface};

/// Shows a spinner while each probe runs and finishes it with the marker.
pub struct ProbeProgress<'a> {
    ui: &'a mut dyn UserInterface,
    spinner: Option<Box<dyn SpinnerHandle>>,
}

impl<'a> ProbeProgress<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui, spinner: None }
    }
}

impl ProbeObserver for ProbeProgress<'_> {
    fn probe_started(&mut self, index: usize, total: usize, probe: &dyn Probe) {
        let message = format!("[{}/{}] {}", index + 1, total, probe.description());
        self.spinner = Some(self.ui.start_spinner(&message));
    }

    fn probe_finished(&mut self, outcome: &ProbeOutcome) {
        let Some(mut spinner) = self.spinner.take() else {
            return;
        };
        let line = format!("{} {}", outcome.name, Marker::from(outcome.result));
        match outcome.result {
            ProbeResult::Present => spinner.finish_success(&line),
            ProbeResult::Absent => spinner.finish_error(&line),
            ProbeResult::Unknown => spinner.finish_skipped(&line),
        }
    }
}
