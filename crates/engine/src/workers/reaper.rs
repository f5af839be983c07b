//! Periodic expiry sweep.
//!
//! Expiry is lazy on access; the reaper bounds how long an abandoned session
//! can linger and makes sure its abandonment reaches the ledger.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::api::{EngineError, Result};
use crate::orchestrator::CombatEngine;

/// Handle to a running reaper task.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stops the reaper and waits for its task to finish.
    pub async fn shutdown(self) -> Result<()> {
        // Err means the task already exited.
        let _ = self.shutdown_tx.send(());
        self.join.await.map_err(EngineError::WorkerJoin)
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

pub(crate) fn spawn_reaper(engine: Arc<CombatEngine>, interval: Duration) -> ReaperHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let period = interval.max(Duration::from_millis(1));

    let join = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(interval_ms = period.as_millis() as u64, "session reaper started");

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => match engine.sweep_expired().await {
                    Ok(0) => {}
                    Ok(count) => debug!(count, "reaper swept expired sessions"),
                    Err(err) => error!(error = %err, "session sweep failed"),
                },
            }
        }

        info!("session reaper stopped");
    });

    ReaperHandle { shutdown_tx, join }
}
