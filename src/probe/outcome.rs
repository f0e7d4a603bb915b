//! Terminal result of a probe.

use std::time::Duration;

use crate::candidates::Endpoint;
use crate::probe::error::ProbeError;

/// Outcome of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered correctly; `latency` is for the winning attempt only.
    Success { endpoint: Endpoint, latency: Duration },
    /// The endpoint never answered correctly.
    Failure { endpoint: Endpoint },
}

impl ProbeOutcome {
    pub fn from_attempt(endpoint: Endpoint, attempt: Result<Duration, ProbeError>) -> Self {
        match attempt {
            Ok(latency) => Self::Success { endpoint, latency },
            Err(_) => Self::Failure { endpoint },
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        match self {
            Self::Success { endpoint, .. } | Self::Failure { endpoint } => endpoint,
        }
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Success { latency, .. } => Some(*latency),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
