//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a failed probe up to the attempt limit
//! - Wait the backoff delay between attempts, never after the last one
//! - Report every failed attempt with its cause
//!
//! # Design Decisions
//! - First success wins; its latency is the reported latency
//! - Failures are logged, never propagated

use tokio::time::sleep;

use crate::candidates::Endpoint;
use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::probe::{Probe, ProbeOutcome};
use crate::resilience::backoff::Backoff;

/// Attempt limit and delay policy for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Backoff::from_config(config))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Probe `endpoint` until it succeeds or the attempt budget runs out.
pub async fn retry_probe<P: Probe>(
    probe: &P,
    endpoint: &Endpoint,
    policy: &RetryPolicy,
) -> ProbeOutcome {
    let max_attempts = policy.max_attempts;

    for attempt in 1..=max_attempts {
        match probe.attempt(endpoint).await {
            Ok(latency) => {
                metrics::record_attempt("success");
                metrics::record_latency(latency);
                tracing::debug!(
                    endpoint = %endpoint,
                    attempt,
                    latency_ms = latency.as_millis() as u64,
                    "Probe succeeded"
                );
                return ProbeOutcome::Success {
                    endpoint: endpoint.clone(),
                    latency,
                };
            }
            Err(e) => {
                metrics::record_attempt(e.kind());
                tracing::warn!(
                    endpoint = %endpoint,
                    attempt,
                    max_attempts,
                    error = %e,
                    "Probe attempt failed"
                );

                if attempt < max_attempts {
                    sleep(policy.backoff.delay(attempt)).await;
                }
            }
        }
    }

    ProbeOutcome::Failure {
        endpoint: endpoint.clone(),
    }
}
