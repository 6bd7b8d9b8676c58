//! Error types for worker-service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },

    #[error("Failed to bind {addr}")]
    BindError {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Signal handler error: {0}")]
    SignalError(String),

    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
