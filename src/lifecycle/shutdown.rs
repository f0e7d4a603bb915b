//! Shutdown coordination for a probing run.

use tokio::sync::broadcast;

/// Coordinator for early termination.
///
/// Every fan-out subscribes before it starts; a trigger reaches all of them.
/// Dropping the coordinator without triggering closes the channel, which
/// subscribers treat as "never cancel".
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
