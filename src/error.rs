//! Run-level errors.
//!
//! Only conditions that stop the prober from producing meaningful output live
//! here. Per-attempt probe failures are [`crate::probe::ProbeError`] and never
//! escape the retrier.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors for a probing run.
#[derive(Debug, Error)]
pub enum ProberError {
    /// Reading the candidate file or writing an output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// The metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),
}

impl ProberError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for run-level operations.
pub type ProberResult<T> = Result<T, ProberError>;
