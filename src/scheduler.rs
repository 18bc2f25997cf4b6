use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::state::SharedState;

async fn run_sweep(state: &SharedState) {
    let start = std::time::Instant::now();
    info!(
        event = "job_started",
        job_name = "auto_sync",
        "Starting scheduled playlist sync sweep"
    );

    match state.sync_service.sync_all_auto().await {
        Ok(stats) => info!(
            event = "job_finished",
            job_name = "auto_sync",
            playlists = stats.playlists,
            added = stats.added,
            failed = stats.failed,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Scheduled playlist sync sweep finished"
        ),
        Err(e) => error!(
            event = "job_failed",
            job_name = "auto_sync",
            error = %e,
            "Scheduled playlist sync sweep failed"
        ),
    }
}

/// Drives the recurring auto-sync sweep. The reconciler itself is
/// schedule-agnostic; this is the only place that decides cadence.
pub struct Scheduler {
    state: Arc<SharedState>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    pub fn new(state: Arc<SharedState>, config: SchedulerConfig) -> Self {
        Self {
            state,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        if let Some(cron_expr) = &self.config.cron_expression {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);

        let job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let state = Arc::clone(&state);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                run_sweep(&state).await;
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Scheduler running with cron: {}", cron_expr);

        loop {
            if !*self.running.read().await {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let interval_hours = self.config.sync_interval_hours.max(1);

        info!("Scheduler running: auto-sync sweep every {interval_hours}h");

        let mut sweep_interval =
            interval(Duration::from_secs(u64::from(interval_hours) * 60 * 60));
        // The first tick fires immediately; skip it so startup does not
        // trigger a sweep before the server is up.
        sweep_interval.tick().await;

        loop {
            sweep_interval.tick().await;
            if !*self.running.read().await {
                break;
            }
            run_sweep(&self.state).await;
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    pub async fn run_once(&self) -> Result<()> {
        info!("Running manual sync sweep...");
        run_sweep(&self.state).await;
        Ok(())
    }
}
