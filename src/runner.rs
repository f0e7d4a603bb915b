//! Run orchestration.
//!
//! # Data Flow
//! ```text
//! load_candidates (input + prior results in merge mode)
//!     → Scheduler::run (retry_probe per endpoint, outcomes to sink)
//!     → rank
//!     → Persister::persist (survivors, then endpoints cut short by shutdown)
//!     → flatten (optional)
//! ```
//!
//! # Design Decisions
//! - The HTTP client is built per run and dropped when the run returns,
//!   whatever the exit path
//! - File I/O errors are the only fatal errors
//! - An interrupted run never drops a candidate it did not get a verdict for

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::Instrument;
use uuid::Uuid;

use crate::candidates::load_candidates;
use crate::config::{Collection, ProberConfig};
use crate::error::ProberResult;
use crate::observability::logging::run_span;
use crate::persist::{flatten, Persister};
use crate::probe::{HttpProber, Probe};
use crate::ranking::rank;
use crate::resilience::RetryPolicy;
use crate::scheduler::Scheduler;

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Unique endpoints probed.
    pub candidates: usize,
    /// Endpoints written to the output file.
    pub survivors: usize,
    /// Endpoints that exhausted their attempts.
    pub failed: usize,
    /// Endpoints cut short by shutdown, written back unverified.
    pub cancelled: usize,
}

/// Executes one probing run from a validated configuration.
#[derive(Debug, Clone)]
pub struct Runner {
    config: ProberConfig,
}

impl Runner {
    pub fn new(config: ProberConfig) -> Self {
        Self { config }
    }

    /// Run with an HTTP prober built from the configuration.
    pub async fn run(&self, shutdown: broadcast::Receiver<()>) -> ProberResult<RunReport> {
        let prober = Arc::new(HttpProber::new(&self.config.probe)?);
        self.run_with(prober, shutdown).await
    }

    /// Run with the given probe.
    pub async fn run_with<P: Probe + 'static>(
        &self,
        probe: Arc<P>,
        shutdown: broadcast::Receiver<()>,
    ) -> ProberResult<RunReport> {
        let run_id = Uuid::new_v4();
        self.execute(run_id, probe, shutdown)
            .instrument(run_span(run_id))
            .await
    }

    async fn execute<P: Probe + 'static>(
        &self,
        run_id: Uuid,
        probe: Arc<P>,
        shutdown: broadcast::Receiver<()>,
    ) -> ProberResult<RunReport> {
        let files = &self.config.files;
        let persister = Persister::from_config(files, &self.config.persist);

        let candidates =
            load_candidates(Path::new(&files.input_path), persister.prior_results()).await?;
        let total = candidates.len();

        let scheduler = Scheduler::from_config(
            probe,
            RetryPolicy::from_config(&self.config.retries),
            &self.config.scheduler,
        );

        let progress = match self.config.scheduler.collection {
            Collection::StreamAsCompleted => persister.progress_writer().await?,
            Collection::GatherAll => None,
        };
        let fan_in = match progress {
            Some(mut writer) => {
                let fan_in = scheduler.run(candidates, &mut writer, shutdown).await?;
                let streamed = writer.finish().await?;
                tracing::debug!(streamed, "Streamed survivors flushed");
                fan_in
            }
            None => scheduler.run(candidates, &mut (), shutdown).await?,
        };

        let completed = fan_in.outcomes.len();
        let ranked = rank(fan_in.outcomes);
        persister.persist(&ranked, &fan_in.cancelled).await?;

        if let Some(flatten_path) = &files.flatten_path {
            flatten(persister.path(), Path::new(flatten_path)).await?;
        }

        let report = RunReport {
            run_id,
            candidates: total,
            survivors: ranked.len(),
            failed: completed - ranked.len(),
            cancelled: fan_in.cancelled.len(),
        };
        tracing::info!(
            candidates = report.candidates,
            survivors = report.survivors,
            failed = report.failed,
            cancelled = report.cancelled,
            "Run complete"
        );
        Ok(report)
    }
}
