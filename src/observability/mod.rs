//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, per-run span)
//!     → metrics.rs (attempt counters, latency histogram)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus text snapshot file (optional)
//! ```
//!
//! # Design Decisions
//! - Every failed attempt is logged with endpoint, attempt and cause
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
