//! # Configuration
//!
//! Environment-driven settings for the conductor. Defaults are tuned for test
//! orchestration runs where remote operations are slow and flaky.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConductorError, Result};

/// Config path naming the cluster the conductor itself runs in. Registering a
/// cluster as in-cluster maps its uid to this path.
pub const IN_CLUSTER_CONFIG_PATH: &str = "";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConductorConfig {
    /// Default window for retried asynchronous conditions, in milliseconds.
    pub retry_timeout_ms: u64,
    /// Default sleep between retry attempts, in milliseconds.
    pub retry_backoff_ms: u64,
    /// Config path substituted for clusters registered as in-cluster.
    pub in_cluster_config_path: String,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            retry_timeout_ms: 600_000,
            retry_backoff_ms: 10_000,
            in_cluster_config_path: IN_CLUSTER_CONFIG_PATH.to_string(),
        }
    }
}

impl ConductorConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("CONDUCTOR_RETRY_TIMEOUT_MS") {
            config.retry_timeout_ms = timeout.parse().map_err(|e| {
                ConductorError::Configuration(format!("invalid retry_timeout_ms: {e}"))
            })?;
        }

        if let Ok(backoff) = std::env::var("CONDUCTOR_RETRY_BACKOFF_MS") {
            config.retry_backoff_ms = backoff.parse().map_err(|e| {
                ConductorError::Configuration(format!("invalid retry_backoff_ms: {e}"))
            })?;
        }

        if let Ok(path) = std::env::var("CONDUCTOR_IN_CLUSTER_CONFIG_PATH") {
            config.in_cluster_config_path = path;
        }

        Ok(config)
    }

    pub fn retry_timeout(&self) -> Duration {
        Duration::from_millis(self.retry_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
