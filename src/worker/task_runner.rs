//! Task runner - main worker loop

use crate::error::{Result, WorkerError};
use crate::worker::{Job, JobOutcome, JobProcessor, WorkerConfig, WorkerState};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, error, info};

/// Task runner that synthesizes and processes jobs until shutdown
pub struct TaskRunner {
    state: Arc<WorkerState>,
    config: WorkerConfig,
    processor: Arc<dyn JobProcessor>,
}

impl TaskRunner {
    /// Create a new task runner
    pub fn new<P>(state: Arc<WorkerState>, config: WorkerConfig, processor: P) -> Self
    where
        P: JobProcessor + 'static,
    {
        Self {
            state,
            config,
            processor: Arc::new(processor),
        }
    }

    /// Get a handle to signal shutdown
    pub fn shutdown_handle(&self) -> Arc<WorkerState> {
        Arc::clone(&self.state)
    }

    /// Main worker loop
    ///
    /// Processes jobs until shutdown is requested, then returns the total
    /// number of jobs processed. Failed jobs never end the loop.
    pub async fn run(&self) -> u64 {
        info!(
            "Starting worker service in {} environment",
            self.state.environment()
        );
        info!("Job interval: {:?}", self.config.job_interval);
        info!(
            "Beta features: {}",
            if self.config.beta_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        while self.state.is_running() {
            match self.process_one_job().await {
                Ok(outcome) => {
                    debug!(
                        "Job {} took {:?}, waiting {:?} before next job",
                        outcome.job_id, outcome.elapsed, self.config.job_interval
                    );
                    self.wait(self.config.job_interval).await;
                }
                Err(e) => {
                    error!("Error processing job: {}", e);
                    self.wait(self.config.timing.error_backoff).await;
                }
            }
        }

        self.state.mark_stopped();

        let total = self.state.jobs_processed();
        info!("Worker stopped. Total jobs processed: {}", total);
        total
    }

    /// Process the next job and commit it to the counter
    pub async fn process_one_job(&self) -> Result<JobOutcome> {
        let job = Job::new(self.state.next_job_id());

        let outcome = self.processor.process(&job).await?;
        let total = self.state.record_job_completed();
        debug!("Committed {} (total: {})", job, total);

        Ok(outcome)
    }

    /// Run once and exit (for testing)
    pub async fn run_once(&self) -> Result<JobOutcome> {
        info!("Running worker in single-task mode...");
        let outcome = self.process_one_job().await;
        self.state.mark_stopped();
        outcome
    }

    /// Wait for `duration` unless shutdown is requested first
    async fn wait(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        let granularity = self.config.timing.poll_granularity;

        loop {
            if !self.state.is_running() {
                return;
            }

            let now = Instant::now();
            if now >= deadline {
                return;
            }

            let remaining = deadline - now;
            let tick = if granularity.is_zero() {
                remaining
            } else {
                granularity.min(remaining)
            };

            tokio::select! {
                _ = self.state.cancelled() => return,
                _ = sleep(tick) => {}
            }
        }
    }
}

/// Setup signal handlers for graceful shutdown
///
/// SIGTERM and SIGINT both request a shutdown. The listener keeps running so
/// repeated signals are reported and ignored.
#[cfg(unix)]
pub fn setup_signal_handler(state: Arc<WorkerState>) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| WorkerError::SignalError(format!("SIGTERM: {}", e)))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| WorkerError::SignalError(format!("SIGINT: {}", e)))?;

    Ok(tokio::spawn(async move {
        loop {
            let name = tokio::select! {
                Some(()) = sigterm.recv() => "SIGTERM",
                Some(()) = sigint.recv() => "SIGINT",
                else => break,
            };
            on_signal(&state, name);
        }
    }))
}

/// Setup signal handlers for graceful shutdown
#[cfg(not(unix))]
pub fn setup_signal_handler(state: Arc<WorkerState>) -> Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        loop {
            match tokio::signal::ctrl_c().await {
                Ok(()) => on_signal(&state, "Ctrl+C"),
                Err(e) => {
                    error!("{}", WorkerError::SignalError(e.to_string()));
                    break;
                }
            }
        }
    }))
}

fn on_signal(state: &WorkerState, name: &str) {
    if state.request_shutdown() {
        info!("Received {}, shutting down gracefully...", name);
    } else {
        info!("Received {} while {}, ignoring", name, state.phase());
    }
}
