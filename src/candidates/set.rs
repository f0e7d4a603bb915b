//! Deduplicated working set of endpoints.

use std::collections::HashSet;
use std::vec;

use crate::candidates::endpoint::Endpoint;

/// Unique endpoints to verify during one run.
///
/// Built once from the input sources, then consumed by the scheduler.
/// First-seen order is kept so unverified endpoints can be written back
/// where they were.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    order: Vec<Endpoint>,
    seen: HashSet<Endpoint>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint. Returns `false` if it was already present.
    pub fn insert(&mut self, endpoint: Endpoint) -> bool {
        if !self.seen.insert(endpoint.clone()) {
            return false;
        }
        self.order.push(endpoint);
        true
    }

    /// Merge newline-delimited candidates, returning how many were new.
    pub fn extend_from_lines(&mut self, content: &str) -> usize {
        parse_lines(content)
            .map(|e| self.insert(e))
            .filter(|&new| new)
            .count()
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.seen.contains(endpoint)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Endpoint> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Endpoint>>(iter: I) -> Self {
        let mut set = Self::new();
        for endpoint in iter {
            set.insert(endpoint);
        }
        set
    }
}

/// Yields endpoints in first-seen order.
impl IntoIterator for CandidateSet {
    type Item = Endpoint;
    type IntoIter = vec::IntoIter<Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

/// Split text into endpoints: one per line, trimmed, blank lines skipped.
pub fn parse_lines(content: &str) -> impl Iterator<Item = Endpoint> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Endpoint::from)
}
