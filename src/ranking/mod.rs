//! Ranking of probe outcomes.
//!
//! Failures are dropped, survivors sorted by ascending latency. Ties keep no
//! particular order.

use std::collections::HashSet;
use std::time::Duration;

use crate::candidates::Endpoint;
use crate::probe::ProbeOutcome;

/// A surviving endpoint and the latency of its successful attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub endpoint: Endpoint,
    pub latency: Duration,
}

/// Survivors in non-decreasing latency order, each endpoint at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedResult {
    entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.entries.iter().map(|e| &e.endpoint)
    }
}

/// Drop failures and sort the rest by ascending latency.
pub fn rank<I>(outcomes: I) -> RankedResult
where
    I: IntoIterator<Item = ProbeOutcome>,
{
    let mut entries: Vec<RankedEntry> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            ProbeOutcome::Success { endpoint, latency } => Some(RankedEntry { endpoint, latency }),
            ProbeOutcome::Failure { .. } => None,
        })
        .collect();

    entries.sort_unstable_by_key(|e| e.latency);

    // Keep the fastest entry if an endpoint was reported twice.
    let mut seen = HashSet::with_capacity(entries.len());
    entries.retain(|e| seen.insert(e.endpoint.clone()));

    RankedResult { entries }
}
