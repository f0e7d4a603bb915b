//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a probing run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the endpoint prober.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProberConfig {
    /// Input, output and flatten file locations.
    pub files: FilesConfig,

    /// Single-attempt probe settings.
    pub probe: ProbeConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Fan-out settings.
    pub scheduler: SchedulerConfig,

    /// Output persistence settings.
    pub persist: PersistConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// File locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Newline-delimited candidate endpoints.
    pub input_path: String,

    /// Ranked survivors, one per line.
    pub output_path: String,

    /// Optional comma-joined copy of the output file.
    pub flatten_path: Option<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input_path: "API.txt".to_string(),
            output_path: "API.txt".to_string(),
            flatten_path: Some("success_result.txt".to_string()),
        }
    }
}

/// Where the probe request is sent, relative to the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePath {
    /// POST to the endpoint itself.
    #[default]
    Bare,
    /// POST to `<endpoint>/translate`.
    Translate,
}

/// How the `data` field of a probe response is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCheck {
    /// Present and not null, false, zero or empty.
    #[default]
    Truthy,
    /// Present and its string rendering is non-empty.
    NonEmpty,
}

/// Single-attempt probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe target derivation.
    pub path: ProbePath,

    /// Success predicate for the `data` field.
    pub data_check: DataCheck,

    /// Total time allowed for one attempt, in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: ProbePath::Bare,
            data_check: DataCheck::Truthy,
            timeout_secs: 5,
            connect_timeout_secs: 5,
        }
    }
}

/// Backoff strategy between attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per endpoint (including the first).
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds.
    pub delay_ms: u64,

    /// Backoff strategy.
    pub backoff: BackoffKind,

    /// Upper bound for exponential backoff, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
            backoff: BackoffKind::Fixed,
            max_delay_ms: 8000,
        }
    }
}

/// How finished probes are handed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Wait for every probe, then process the whole batch.
    #[default]
    GatherAll,
    /// Process each outcome as soon as its probe finishes.
    StreamAsCompleted,
}

/// Fan-out configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Completion collection policy.
    pub collection: Collection,

    /// Maximum endpoints probed at once. Unbounded when absent.
    pub max_concurrency: Option<usize>,
}

/// Output persistence strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Replace the output file with this run's survivors.
    #[default]
    Overwrite,
    /// Re-probe the output file's endpoints and write survivors in batches.
    Merge,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistConfig {
    pub mode: PersistMode,

    /// Lines per write in merge mode.
    pub batch_size: usize,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            mode: PersistMode::Overwrite,
            batch_size: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Write a Prometheus text snapshot here when the run ends.
    pub metrics_path: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_path: None,
        }
    }
}
