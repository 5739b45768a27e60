//! Synchronization configuration from TOML (`[sync]` section)

use pointing_application::config::behavior::DEFAULT_CLOSE_TIMEOUT_SECS;
use pointing_domain::DEFAULT_SCALE_CEILING;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSyncConfig {
    /// Extra write attempts after the first failure
    pub max_retries: usize,
    /// Fixed wait between attempts
    pub retry_delay_ms: u64,
    /// Largest Fibonacci value generated is the first one >= this
    pub scale_ceiling: u64,
    /// Deadline for a whole close operation
    pub close_timeout_seconds: Option<u64>,
}

impl Default for FileSyncConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay_ms: 1000,
            scale_ceiling: DEFAULT_SCALE_CEILING,
            close_timeout_seconds: Some(DEFAULT_CLOSE_TIMEOUT_SECS),
        }
    }
}
