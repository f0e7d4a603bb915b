//! Per-attempt probe failures.

use std::time::Duration;

use thiserror::Error;

/// Why a single probe attempt did not count as a success.
///
/// These are transient by definition: the retrier logs them and tries again,
/// and they never abort the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    /// Connection or transport failure.
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The attempt exceeded its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with something other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body could not be decoded as JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] reqwest::Error),

    /// The JSON body has no acceptable `data` field.
    #[error("response has no usable `data` field")]
    MissingData,
}

impl ProbeError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::InvalidEndpoint(_) => "invalid_endpoint",
            ProbeError::Network(_) => "network",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::Status(_) => "status",
            ProbeError::MalformedBody(_) => "malformed_body",
            ProbeError::MissingData => "missing_data",
        }
    }
}
