//! Plain-text status summary.

use std::fmt;

use serde::Serialize;

use crate::probe::{ProbeId, ProbeResult};

use super::DiagnosticReport;

/// Status marker shown next to each probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOT-OK")]
    NotOk,
    #[serde(rename = "NOT-TESTED")]
    NotTested,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Ok => "OK",
            Marker::NotOk => "NOT-OK",
            Marker::NotTested => "NOT-TESTED",
        }
    }
}

impl From<ProbeResult> for Marker {
    fn from(result: ProbeResult) -> Self {
        match result {
            ProbeResult::Present => Marker::Ok,
            ProbeResult::Absent => Marker::NotOk,
            ProbeResult::Unknown => Marker::NotTested,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(probe, marker)` pair per outcome, in report order.
pub fn summary_lines(report: &DiagnosticReport) -> Vec<(ProbeId, Marker)> {
    report
        .iter()
        .map(|outcome| (outcome.name, Marker::from(outcome.result)))
        .collect()
}

/// Width of the longest probe name in the report.
pub fn name_width(report: &DiagnosticReport) -> usize {
    report
        .iter()
        .map(|outcome| outcome.name.as_str().len())
        .max()
        .unwrap_or(0)
}

/// Render the report as one `name  MARKER` line per probe.
pub fn render_summary(report: &DiagnosticReport) -> String {
    let width = name_width(report);
    let mut out = String::new();
    for (id, marker) in summary_lines(report) {
        out.push_str(&format!("{:<width$}  {}\n", id.as_str(), marker, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_results() {
        assert_eq!(Marker::from(ProbeResult::Present), Marker::Ok);
        assert_eq!(Marker::from(ProbeResult::Absent), Marker::NotOk);
        assert_eq!(Marker::from(ProbeResult::Unknown), Marker::NotTested);
        assert_eq!(Marker::NotTested.to_string(), "NOT-TESTED");
    }

    #[test]
    fn summary_lines_keep_report_order() {
        let report = DiagnosticReport::from_results([
            (ProbeId::TorchCuda, ProbeResult::Unknown),
            (ProbeId::DriverPresent, ProbeResult::Present),
        ]);
        assert_eq!(
            summary_lines(&report),
            vec![
                (ProbeId::TorchCuda, Marker::NotTested),
                (ProbeId::DriverPresent, Marker::Ok)
            ]
        );
    }

    #[test]
    fn render_aligns_names() {
        let report = DiagnosticReport::from_results([
            (ProbeId::DriverPresent, ProbeResult::Present),
            (ProbeId::RuntimeRoundtrip, ProbeResult::Absent),
        ]);
        let rendered = render_summary(&report);
        assert_eq!(
            rendered,
            "driver_present     OK\nruntime_roundtrip  NOT-OK\n"
        );
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(render_summary(&DiagnosticReport::default()), "");
    }
}
