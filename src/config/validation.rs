//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts >= 1, batch size >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProberConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::{BackoffKind, ProberConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a deserialized configuration for values that would make a run meaningless.
pub fn validate_config(config: &ProberConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.files.input_path.trim().is_empty() {
        errors.push(ValidationError::new("files.input_path", "must not be empty"));
    }
    if config.files.output_path.trim().is_empty() {
        errors.push(ValidationError::new("files.output_path", "must not be empty"));
    }
    if matches!(&config.files.flatten_path, Some(p) if p.trim().is_empty()) {
        errors.push(ValidationError::new("files.flatten_path", "must not be empty when set"));
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::new("probe.timeout_secs", "must be greater than 0"));
    }
    if config.probe.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("probe.connect_timeout_secs", "must be greater than 0"));
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if config.retries.backoff == BackoffKind::Exponential
        && config.retries.max_delay_ms < config.retries.delay_ms
    {
        errors.push(ValidationError::new(
            "retries.max_delay_ms",
            format!("must be >= delay_ms ({})", config.retries.delay_ms),
        ));
    }

    if config.scheduler.max_concurrency == Some(0) {
        errors.push(ValidationError::new(
            "scheduler.max_concurrency",
            "must be at least 1 (omit for unbounded)",
        ));
    }

    if config.persist.batch_size == 0 {
        errors.push(ValidationError::new("persist.batch_size", "must be at least 1"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
