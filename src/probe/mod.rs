//! Single-attempt endpoint verification.
//!
//! # Data Flow
//! ```text
//! Endpoint
//!     → request.rs (derive target URL, fixed JSON payload)
//!     → http.rs (POST under a per-attempt deadline, time it)
//!     → request.rs (judge the `data` field)
//!     → Ok(latency) | Err(ProbeError)
//!     → outcome.rs (ProbeOutcome::Success / Failure)
//! ```
//!
//! # Design Decisions
//! - A probe never fails the run; every error is an attempt outcome
//! - Latency covers one attempt, dispatch to decoded body
//! - The [`Probe`] trait is the seam between the retrier and the network

use std::future::Future;
use std::time::Duration;

use crate::candidates::Endpoint;

pub mod error;
pub mod http;
pub mod outcome;
pub mod request;

pub use error::ProbeError;
pub use http::HttpProber;
pub use outcome::ProbeOutcome;
pub use request::TranslationRequest;

/// One verification attempt against an endpoint.
pub trait Probe: Send + Sync {
    /// Run one attempt and return its latency on success.
    fn attempt(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<Duration, ProbeError>> + Send;

    /// Run one attempt and fold the result into an outcome.
    fn probe(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeOutcome> + Send {
        async move { ProbeOutcome::from_attempt(endpoint.clone(), self.attempt(endpoint).await) }
    }
}
