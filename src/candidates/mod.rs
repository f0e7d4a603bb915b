//! Candidate endpoints.
//!
//! # Data Flow
//! ```text
//! input file ─┐
//!             ├→ loader.rs (trim lines, skip blanks)
//! prior file ─┘    → set.rs (exact-string dedup)
//!                  → CandidateSet (immutable, handed to the scheduler)
//! ```

pub mod endpoint;
pub mod loader;
pub mod set;

pub use endpoint::Endpoint;
pub use loader::load_candidates;
pub use set::{parse_lines, CandidateSet};
