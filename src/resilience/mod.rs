//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe attempt fails:
//!     → retries.rs (attempts left? log the cause)
//!     → backoff.rs (how long to wait)
//!     → sleep, then next attempt
//! ```
//!
//! # Design Decisions
//! - Timeouts live in the probe; every attempt has a deadline
//! - Backoff suspends only the endpoint's own task
//! - Fixed delay by default, exponential with jitter on request

pub mod backoff;
pub mod retries;

pub use backoff::Backoff;
pub use retries::{retry_probe, RetryPolicy};
