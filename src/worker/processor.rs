//! Job processors
//!
//! `JobProcessor` is the seam between the task runner and the work itself.
//! The service ships a single implementation that simulates work with fixed
//! delays and never fails.

use crate::error::Result;
use crate::worker::{Job, JobOutcome, JobTiming, WorkerConfig};
use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::info;

/// Processes one job at a time
#[async_trait]
pub trait JobProcessor: Send + Sync {
    /// Process a single job
    ///
    /// An `Err` is treated as transient by the task runner: it is logged,
    /// followed by a backoff, and the loop carries on.
    async fn process(&self, job: &Job) -> Result<JobOutcome>;
}

/// Simulated processor: fixed work delay plus an optional beta step
pub struct SimulatedJobProcessor {
    timing: JobTiming,
    beta_enabled: bool,
}

impl SimulatedJobProcessor {
    /// Create a new simulated processor
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            timing: config.timing,
            beta_enabled: config.beta_enabled,
        }
    }
}

#[async_trait]
impl JobProcessor for SimulatedJobProcessor {
    async fn process(&self, job: &Job) -> Result<JobOutcome> {
        let started = Instant::now();
        info!("Processing job {}", job);

        sleep(self.timing.work).await;

        if self.beta_enabled {
            info!("Job {} - Beta processing enabled", job);
            sleep(self.timing.beta_work).await;
        }

        info!("Completed job {}", job);

        Ok(JobOutcome {
            job_id: job.id.clone(),
            beta_processed: self.beta_enabled,
            elapsed: started.elapsed(),
        })
    }
}
