//! Inactivity sweeper
//!
//! Periodically evicts participants that stopped sending heartbeats and
//! announces their departure to the room.

use chrono::{DateTime, Local, Utc};
use std::time::Duration;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::models::clock_time;

#[derive(Clone)]
pub struct Sweeper {
    db: Database,
    period: Duration,
    threshold: Duration,
}

impl Sweeper {
    pub fn new(db: Database, period: Duration, threshold: Duration) -> Self {
        Self {
            db,
            period,
            threshold,
        }
    }

    pub fn from_config(db: Database, config: &Config) -> Self {
        Self::new(db, config.sweep_interval(), config.inactivity_threshold())
    }

    /// Run one sweep against the current clock
    pub async fn sweep(&self) -> Result<Vec<String>, sqlx::Error> {
        self.sweep_at(Utc::now()).await
    }

    /// Run one sweep as if the clock read `now`. Returns the evicted names.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<Vec<String>, sqlx::Error> {
        let threshold_ms = i64::try_from(self.threshold.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.timestamp_millis().saturating_sub(threshold_ms);
        let time = clock_time(now.with_timezone(&Local));

        let evicted = self.db.evict_inactive(cutoff, &time).await?;
        let names: Vec<String> = evicted.into_iter().map(|p| p.name).collect();

        if !names.is_empty() {
            info!("Evicted {} inactive participant(s): {:?}", names.len(), names);
        }

        Ok(names)
    }

    /// Spawn the sweep loop. The first sweep happens one period after start.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            // interval panics on a zero period
            let period = self.period.max(Duration::from_millis(1));
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "Inactivity sweeper started (period {:?}, threshold {:?})",
                self.period, self.threshold
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.sweep().await {
                            error!("Inactivity sweep failed: {}", e);
                        }
                    }
                    _ = &mut shutdown_rx => break,
                }
            }

            info!("Inactivity sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running sweep loop
pub struct SweeperHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop to stop and wait for it to finish its current tick
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!("Inactivity sweeper task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;

    #[tokio::test]
    async fn test_loop_sweeps_and_stops() {
        let db = test_db().await;
        db.register_participant("Ghost", 0, "00:00:00").await.unwrap();

        let handle = Sweeper::new(db.clone(), Duration::from_millis(20), Duration::from_millis(10_000))
            .start();

        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.stop().await;

        assert!(db.list_participants().await.unwrap().is_empty());
        let messages = db.list_messages().await.unwrap();
        assert_eq!(messages.last().unwrap().text, "sai da sala...");
    }

    #[tokio::test]
    async fn test_stop_before_first_tick() {
        let db = test_db().await;
        db.register_participant("Ghost", 0, "00:00:00").await.unwrap();

        let handle = Sweeper::new(db.clone(), Duration::from_secs(3600), Duration::from_millis(1))
            .start();
        handle.stop().await;

        assert_eq!(db.list_participants().await.unwrap().len(), 1);
    }
}
