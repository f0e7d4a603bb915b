//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides for input/output paths
//!     → validation.rs (semantic checks, once)
//!     → ProberConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the prober runs without a config file
//! - Validation separates syntactic (serde) from semantic checks
//! - Ambiguous probe semantics (target path, `data` predicate) are explicit options

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{
    BackoffKind, Collection, DataCheck, FilesConfig, ObservabilityConfig, PersistConfig,
    PersistMode, ProbeConfig, ProbePath, ProberConfig, RetryConfig, SchedulerConfig,
};
pub use validation::{validate_config, ValidationError};
