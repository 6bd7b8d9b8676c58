//! Job types

use std::fmt;
use std::time::Duration;

/// One synthetic unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Result of a successfully processed job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job_id: String,

    /// Whether the beta processing step ran
    pub beta_processed: bool,

    /// Wall time spent on the job
    pub elapsed: Duration,
}
