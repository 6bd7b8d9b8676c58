//! Worker Service - background job processor with health and metrics endpoints
//!
//! The service runs two concurrent tasks that share a single [`WorkerState`]:
//! - the task runner, which synthesizes and processes jobs until a shutdown
//!   signal arrives, then stops after the current step
//! - an HTTP server answering `/health`, `/ready` and `/metrics`
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use worker_service::{ServiceConfig, SimulatedJobProcessor, TaskRunner, WorkerState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServiceConfig::default();
//!     let state = Arc::new(WorkerState::new(&config));
//!     let worker_config = config.worker_config();
//!     let processor = SimulatedJobProcessor::new(&worker_config);
//!
//!     let runner = TaskRunner::new(state, worker_config, processor);
//!     runner.run().await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;
pub mod worker;

pub use config::ServiceConfig;
pub use error::{Result, WorkerError};
pub use worker::{
    setup_signal_handler, Job, JobOutcome, JobProcessor, JobTiming, LoopPhase, MetricsSnapshot,
    SimulatedJobProcessor, TaskRunner, WorkerConfig, WorkerState,
};
