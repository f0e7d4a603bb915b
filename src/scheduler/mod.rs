//! Fan-out scheduling.
//!
//! # Data Flow
//! ```text
//! CandidateSet
//!     → one task per endpoint (optionally gated by a semaphore)
//!         → retry_probe(endpoint)
//!     → JoinSet fan-in, completion order
//!     → OutcomeSink (per outcome when streaming, whole batch when gathering)
//!     → FanIn { outcomes, cancelled }
//! ```
//!
//! # Design Decisions
//! - Tasks share only the probe (read-only) and the retry policy (copied)
//! - The scheduler loop is the single owner of the accumulator
//! - A shutdown signal aborts in-flight tasks; tasks that already finished
//!   are joined first so their outcomes are kept

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};

use crate::candidates::{CandidateSet, Endpoint};
use crate::config::{Collection, SchedulerConfig};
use crate::error::ProberResult;
use crate::observability::metrics;
use crate::probe::{Probe, ProbeOutcome};
use crate::resilience::{retry_probe, RetryPolicy};

/// Receives outcomes from the scheduler loop.
pub trait OutcomeSink {
    fn accept(&mut self, outcome: &ProbeOutcome) -> impl Future<Output = ProberResult<()>>;
}

/// Discards outcomes.
impl OutcomeSink for () {
    async fn accept(&mut self, _outcome: &ProbeOutcome) -> ProberResult<()> {
        Ok(())
    }
}

/// Everything collected by one fan-out.
#[derive(Debug, Default)]
pub struct FanIn {
    /// Outcomes in completion order.
    pub outcomes: Vec<ProbeOutcome>,
    /// Endpoints whose tasks were aborted by shutdown, in candidate order.
    pub cancelled: Vec<Endpoint>,
}

/// Spawned tasks not yet joined, keyed by task id.
type Pending = HashMap<Id, (usize, Endpoint)>;

/// Runs the retrier for every candidate concurrently.
#[derive(Debug)]
pub struct Scheduler<P> {
    probe: Arc<P>,
    policy: RetryPolicy,
    collection: Collection,
    max_concurrency: Option<usize>,
}

impl<P: Probe + 'static> Scheduler<P> {
    /// Unbounded, gather-all scheduler.
    pub fn new(probe: Arc<P>, policy: RetryPolicy) -> Self {
        Self {
            probe,
            policy,
            collection: Collection::GatherAll,
            max_concurrency: None,
        }
    }

    pub fn from_config(probe: Arc<P>, policy: RetryPolicy, config: &SchedulerConfig) -> Self {
        Self::new(probe, policy)
            .with_collection(config.collection)
            .with_max_concurrency(config.max_concurrency)
    }

    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.filter(|&n| n > 0);
        self
    }

    /// Probe every candidate and collect the outcomes.
    ///
    /// Returns early only if the sink fails; remaining tasks are aborted.
    pub async fn run<S: OutcomeSink>(
        &self,
        candidates: CandidateSet,
        sink: &mut S,
        mut shutdown: broadcast::Receiver<()>,
    ) -> ProberResult<FanIn> {
        tracing::info!(
            candidates = candidates.len(),
            max_concurrency = ?self.max_concurrency,
            collection = ?self.collection,
            "Fan-out starting"
        );

        let limiter = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();
        let mut pending: Pending = HashMap::with_capacity(candidates.len());

        for (index, endpoint) in candidates.into_iter().enumerate() {
            let probe = Arc::clone(&self.probe);
            let policy = self.policy;
            let limiter = limiter.clone();
            let task_endpoint = endpoint.clone();

            let handle = tasks.spawn(async move {
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                retry_probe(probe.as_ref(), &task_endpoint, &policy).await
            });
            pending.insert(handle.id(), (index, endpoint));
        }

        let mut fan_in = FanIn {
            outcomes: Vec::with_capacity(pending.len()),
            cancelled: Vec::new(),
        };
        let mut listening = true;

        loop {
            tokio::select! {
                joined = tasks.join_next_with_id() => match joined {
                    None => break,
                    Some(joined) => self.collect(joined, &mut pending, sink, &mut fan_in).await?,
                },
                signal = shutdown.recv(), if listening => match signal {
                    Err(RecvError::Closed) => listening = false,
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        while let Some(joined) = tasks.try_join_next_with_id() {
                            self.collect(joined, &mut pending, sink, &mut fan_in).await?;
                        }

                        let mut unfinished: Vec<_> = pending.drain().map(|(_, v)| v).collect();
                        unfinished.sort_unstable_by_key(|(index, _)| *index);
                        fan_in.cancelled = unfinished.into_iter().map(|(_, e)| e).collect();

                        tracing::warn!(
                            in_flight = fan_in.cancelled.len(),
                            completed = fan_in.outcomes.len(),
                            "Shutdown requested, cancelling in-flight probes"
                        );
                        tasks.shutdown().await;
                        break;
                    }
                },
            }
        }

        if self.collection == Collection::GatherAll {
            for outcome in &fan_in.outcomes {
                sink.accept(outcome).await?;
            }
        }

        tracing::info!(
            completed = fan_in.outcomes.len(),
            succeeded = fan_in.outcomes.iter().filter(|o| o.is_success()).count(),
            cancelled = fan_in.cancelled.len(),
            "Fan-out finished"
        );

        Ok(fan_in)
    }

    /// Record one joined task and hand its outcome to a streaming sink.
    async fn collect<S: OutcomeSink>(
        &self,
        joined: Result<(Id, ProbeOutcome), JoinError>,
        pending: &mut Pending,
        sink: &mut S,
        fan_in: &mut FanIn,
    ) -> ProberResult<()> {
        let outcome = match joined {
            Ok((id, outcome)) => {
                pending.remove(&id);
                outcome
            }
            Err(e) => {
                let Some((_, endpoint)) = pending.remove(&e.id()) else {
                    return Ok(());
                };
                tracing::error!(endpoint = %endpoint, error = %e, "Probe task failed");
                ProbeOutcome::Failure { endpoint }
            }
        };

        metrics::record_endpoint(outcome.is_success());
        if self.collection == Collection::StreamAsCompleted {
            sink.accept(&outcome).await?;
        }
        fan_in.outcomes.push(outcome);
        Ok(())
    }
}
