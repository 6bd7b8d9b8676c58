//! Worker module for the background job loop
//!
//! This module provides:
//! - TaskRunner: Main worker loop with interruptible waits and graceful shutdown
//! - JobProcessor: Processes individual jobs (SimulatedJobProcessor in production)
//! - WorkerState: Counters and lifecycle phase shared with the HTTP server
//! - WorkerConfig: Configuration for the worker

pub mod config;
pub mod job;
pub mod processor;
pub mod state;
pub mod task_runner;

pub use config::{JobTiming, WorkerConfig};
pub use job::{Job, JobOutcome};
pub use processor::{JobProcessor, SimulatedJobProcessor};
pub use state::{LoopPhase, MetricsSnapshot, WorkerState, SERVICE_NAME};
pub use task_runner::{setup_signal_handler, TaskRunner};
