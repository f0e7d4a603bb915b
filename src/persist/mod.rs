//! Durable output.
//!
//! # Data Flow
//! ```text
//! merge mode, streaming:  outcome → BatchWriter (append per batch to <output>.partial)
//! after fan-in:           RankedResult + unverified → <output>.partial → rename over <output>
//! optional:               output file → flatten.rs → comma-joined file
//! ```

pub mod flatten;
pub mod writer;

pub use flatten::{flatten, flatten_lines};
pub use writer::{staging_path, BatchWriter, Persister};
