//! Shared worker state
//!
//! One `WorkerState` exists per process. The task runner is the only writer
//! of the phase and the job counter; the HTTP handlers only read.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::config::ServiceConfig;

/// Service name reported by every endpoint
pub const SERVICE_NAME: &str = "worker-service";

/// Lifecycle phase of the worker loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoopPhase {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

impl LoopPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LoopPhase::Running,
            1 => LoopPhase::Stopping,
            _ => LoopPhase::Stopped,
        }
    }
}

impl fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopPhase::Running => write!(f, "running"),
            LoopPhase::Stopping => write!(f, "stopping"),
            LoopPhase::Stopped => write!(f, "stopped"),
        }
    }
}

/// Point-in-time view served by /metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub service: &'static str,
    pub environment: String,
    pub uptime_seconds: f64,
    pub jobs_processed: u64,
    pub job_interval: u64,
    pub beta_enabled: bool,
}

/// Process-wide worker state
pub struct WorkerState {
    phase: AtomicU8,
    jobs_processed: AtomicU64,
    ready: bool,
    shutdown: CancellationToken,
    started_at: DateTime<Utc>,
    started: Instant,
    environment: String,
    job_interval_secs: u64,
    beta_enabled: bool,
}

impl WorkerState {
    /// Create state for a freshly started process
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            phase: AtomicU8::new(LoopPhase::Running as u8),
            jobs_processed: AtomicU64::new(0),
            // Nothing in the service ever flips readiness off
            ready: true,
            shutdown: CancellationToken::new(),
            started_at: Utc::now(),
            started: Instant::now(),
            environment: config.environment.clone(),
            job_interval_secs: config.job_interval_secs,
            beta_enabled: config.beta_enabled,
        }
    }

    #[cfg(test)]
    pub(crate) fn not_ready(config: &ServiceConfig) -> Self {
        Self {
            ready: false,
            ..Self::new(config)
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> LoopPhase {
        LoopPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// True until a shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.phase() == LoopPhase::Running
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Request a graceful shutdown
    ///
    /// Moves RUNNING to STOPPING and cancels the shutdown token. Returns
    /// `true` only for the call that performed the transition; repeated
    /// requests are no-ops.
    pub fn request_shutdown(&self) -> bool {
        let transitioned = self
            .phase
            .compare_exchange(
                LoopPhase::Running as u8,
                LoopPhase::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        self.shutdown.cancel();
        transitioned
    }

    /// Mark the loop as fully stopped. Terminal.
    pub fn mark_stopped(&self) {
        self.phase.store(LoopPhase::Stopped as u8, Ordering::Release);
        self.shutdown.cancel();
    }

    /// Completes once shutdown has been requested
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.shutdown.cancelled()
    }

    /// Number of jobs committed so far
    pub fn jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Acquire)
    }

    /// Commit one completed job and return the new total
    pub fn record_job_completed(&self) -> u64 {
        self.jobs_processed.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Identifier for the next job, derived from the committed count
    pub fn next_job_id(&self) -> String {
        format!("job-{}", self.jobs_processed() + 1)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since the process started
    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Read-only snapshot of the current counters
    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            service: SERVICE_NAME,
            environment: self.environment.clone(),
            uptime_seconds: self.uptime_seconds(),
            jobs_processed: self.jobs_processed(),
            job_interval: self.job_interval_secs,
            beta_enabled: self.beta_enabled,
        }
    }
}

impl fmt::Debug for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerState")
            .field("phase", &self.phase())
            .field("jobs_processed", &self.jobs_processed())
            .field("ready", &self.is_ready())
            .field("environment", &self.environment)
            .field("job_interval_secs", &self.job_interval_secs)
            .field("beta_enabled", &self.beta_enabled)
            .finish()
    }
}
