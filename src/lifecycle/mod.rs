//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → broadcast → scheduler aborts in-flight probes
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → trigger()
//! ```
//!
//! # Design Decisions
//! - A run has no global deadline; shutdown is the only way to cut it short
//! - Cancellation keeps finished outcomes so partial results still persist

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_interrupt_listener;
