//! The diagnostic report: one outcome per registered probe.

use serde::Serialize;

use crate::probe::{ProbeId, ProbeOutcome, ProbeResult};

/// Ordered probe outcomes for one run.
///
/// Order is registration order. There is at most one outcome per
/// [`ProbeId`]; the report has no mutators once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticReport {
    outcomes: Vec<ProbeOutcome>,
}

impl DiagnosticReport {
    /// Build a report from outcomes. A repeated id replaces the earlier
    /// outcome in place.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        let mut deduped: Vec<ProbeOutcome> = Vec::new();
        for outcome in outcomes {
            match deduped.iter().position(|o| o.name == outcome.name) {
                Some(index) => deduped[index] = outcome,
                None => deduped.push(outcome),
            }
        }
        Self { outcomes: deduped }
    }

    /// Build a report from bare results with empty details.
    pub fn from_results(results: impl IntoIterator<Item = (ProbeId, ProbeResult)>) -> Self {
        Self::from_outcomes(results.into_iter().map(|(name, result)| ProbeOutcome {
            name,
            result,
            detail: String::new(),
        }))
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter()
    }

    pub fn get(&self, id: ProbeId) -> Option<&ProbeOutcome> {
        self.outcomes.iter().find(|o| o.name == id)
    }

    /// Result for `id`; a probe that is not in the report reads as `Unknown`.
    pub fn result(&self, id: ProbeId) -> ProbeResult {
        self.get(id).map(|o| o.result).unwrap_or(ProbeResult::Unknown)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes with the given result.
    pub fn count(&self, result: ProbeResult) -> usize {
        self.outcomes.iter().filter(|o| o.result == result).count()
    }
}
