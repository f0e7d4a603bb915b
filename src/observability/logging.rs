//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level
//! - Every run is wrapped in a span carrying its run ID

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(config: &ObservabilityConfig) {
    let fallback = format!(
        "endpoint_prober={},reqwest=warn",
        config.log_level.to_ascii_lowercase()
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Span covering one probing run.
pub fn run_span(run_id: Uuid) -> tracing::Span {
    tracing::info_span!("run", %run_id)
}
