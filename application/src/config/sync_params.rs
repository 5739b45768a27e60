//! Synchronization parameters (retry policy and estimation settings).
//!
//! [`SyncParams`] groups the static parameters used by
//! [`CloseSessionUseCase`](crate::use_cases::close_session::CloseSessionUseCase)
//! and [`CreateSessionUseCase`](crate::use_cases::create_session::CreateSessionUseCase).

use pointing_domain::{DEFAULT_SCALE_CEILING, EstimationScale};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry with a fixed delay between attempts (no backoff).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: usize,
    /// Wait between two attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: usize, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }

    /// Worst-case time spent waiting between attempts for one write
    pub fn worst_case_delay(&self) -> Duration {
        self.retry_delay * self.max_retries as u32
    }
}

/// Synchronization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncParams {
    /// Retry policy for external writes.
    pub retry: RetryPolicy,
    /// Ceiling used to generate the estimation scale.
    pub scale_ceiling: u64,
    /// Maximum number of issues imported from one tracker query.
    pub max_search_results: usize,
}

impl Default for SyncParams {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            scale_ceiling: DEFAULT_SCALE_CEILING,
            max_search_results: 50,
        }
    }
}

impl SyncParams {
    /// Scale regenerated for the configured ceiling
    pub fn scale(&self) -> EstimationScale {
        EstimationScale::generate(self.scale_ceiling)
    }

    // ==================== Builder Methods ====================

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_scale_ceiling(mut self, ceiling: u64) -> Self {
        self.scale_ceiling = ceiling;
        self
    }

    pub fn with_max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = max;
        self
    }
}
