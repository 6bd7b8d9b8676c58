//! Worker configuration

use std::time::Duration;

/// Durations of the simulated work and the loop's waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTiming {
    /// Baseline duration of one job
    pub work: Duration,

    /// Extra duration when beta processing is enabled
    pub beta_work: Duration,

    /// Wait after a failed job before retrying
    pub error_backoff: Duration,

    /// Granularity at which the inter-job wait re-checks for shutdown
    pub poll_granularity: Duration,
}

impl Default for JobTiming {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(2),
            beta_work: Duration::from_secs(1),
            error_backoff: Duration::from_secs(5),
            poll_granularity: Duration::from_secs(1),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Wait between consecutive jobs
    pub job_interval: Duration,

    /// Run the beta processing step
    pub beta_enabled: bool,

    /// Simulated work and wait durations
    pub timing: JobTiming,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            job_interval: Duration::from_secs(30),
            beta_enabled: false,
            timing: JobTiming::default(),
        }
    }
}

impl WorkerConfig {
    /// Create a new config builder
    pub fn builder() -> WorkerConfigBuilder {
        WorkerConfigBuilder::default()
    }
}

/// Builder for WorkerConfig
#[derive(Default)]
pub struct WorkerConfigBuilder {
    config: WorkerConfig,
}

impl WorkerConfigBuilder {
    /// Set job interval
    pub fn job_interval(mut self, duration: Duration) -> Self {
        self.config.job_interval = duration;
        self
    }

    /// Set job interval in seconds
    pub fn job_interval_secs(mut self, secs: u64) -> Self {
        self.config.job_interval = Duration::from_secs(secs);
        self
    }

    /// Enable/disable beta processing
    pub fn beta_enabled(mut self, enable: bool) -> Self {
        self.config.beta_enabled = enable;
        self
    }

    /// Override work and wait durations
    pub fn timing(mut self, timing: JobTiming) -> Self {
        self.config.timing = timing;
        self
    }

    /// Build the config
    pub fn build(self) -> WorkerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = JobTiming::default();

        assert_eq!(timing.work, Duration::from_secs(2));
        assert_eq!(timing.work + timing.beta_work, Duration::from_secs(3));
        assert_eq!(timing.error_backoff, Duration::from_secs(5));
        assert_eq!(timing.poll_granularity, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_overrides() {
        let timing = JobTiming {
            work: Duration::from_millis(20),
            ..JobTiming::default()
        };
        let config = WorkerConfig::builder()
            .job_interval_secs(1)
            .beta_enabled(true)
            .timing(timing)
            .build();

        assert_eq!(config.job_interval, Duration::from_secs(1));
        assert!(config.beta_enabled);
        assert_eq!(config.timing.work, Duration::from_millis(20));
    }
}
