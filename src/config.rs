//! Service configuration loaded from the environment
//!
//! Every setting is read once at startup. Values come from command-line flags
//! or their backing environment variables (`ENVIRONMENT`, `JOB_INTERVAL`,
//! `FEATURE_BETA`, `PORT`), and are immutable afterwards.

use crate::worker::WorkerConfig;
use clap::Args;
use std::net::SocketAddr;

/// Default job interval in seconds
pub const DEFAULT_JOB_INTERVAL_SECS: u64 = 30;

/// Default port for the health/metrics server
pub const DEFAULT_PORT: u16 = 8080;

/// Default deployment environment name
pub const DEFAULT_ENVIRONMENT: &str = "unknown";

/// Environment-derived service configuration
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Deployment environment name, reported by /metrics
    #[arg(long, env = "ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Seconds to wait between jobs
    #[arg(
        long = "job-interval",
        env = "JOB_INTERVAL",
        default_value_t = DEFAULT_JOB_INTERVAL_SECS,
        value_parser = parse_job_interval
    )]
    pub job_interval_secs: u64,

    /// Enable the beta processing step ("true" enables, anything else disables)
    #[arg(
        long = "beta",
        env = "FEATURE_BETA",
        default_value = "false",
        value_parser = parse_feature_flag,
        action = clap::ArgAction::Set
    )]
    pub beta_enabled: bool,

    /// Port for the health/metrics server
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT, value_parser = parse_port)]
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            job_interval_secs: DEFAULT_JOB_INTERVAL_SECS,
            beta_enabled: false,
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Address the health/metrics server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Loop configuration derived from this service config
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig::builder()
            .job_interval_secs(self.job_interval_secs)
            .beta_enabled(self.beta_enabled)
            .build()
    }
}

/// Parse a feature flag value; only a case-insensitive "true" enables it
pub fn parse_feature_flag(raw: &str) -> std::result::Result<bool, String> {
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

/// Parse a TCP port, ignoring surrounding whitespace
pub fn parse_port(raw: &str) -> std::result::Result<u16, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid port", raw))
}

/// Parse the job interval, which must be a positive number of seconds
pub fn parse_job_interval(raw: &str) -> std::result::Result<u64, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a positive integer", raw))?;

    if secs == 0 {
        return Err("interval must be at least 1 second".to_string());
    }

    Ok(secs)
}
