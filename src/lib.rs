//! Concurrent endpoint-liveness prober.
//!
//! Probes every candidate endpoint with a synthetic translation request,
//! retries failures with backoff, and persists the survivors ranked by
//! ascending latency.

pub mod candidates;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod persist;
pub mod probe;
pub mod ranking;
pub mod resilience;
pub mod runner;
pub mod scheduler;

pub use config::ProberConfig;
pub use error::{ProberError, ProberResult};
pub use lifecycle::Shutdown;
pub use runner::{RunReport, Runner};
