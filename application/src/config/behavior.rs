//! Boundary behavior configuration.

use std::time::Duration;

/// Default deadline for a whole close operation
pub const DEFAULT_CLOSE_TIMEOUT_SECS: u64 = 120;

/// Application behavior configuration.
///
/// The close operation itself imposes no deadline; callers apply
/// `close_timeout` around it.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time a close may take before the caller gives up on it.
    pub close_timeout: Option<Duration>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::with_timeout_seconds(DEFAULT_CLOSE_TIMEOUT_SECS)
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            close_timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            close_timeout: seconds.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = BehaviorConfig::default();
        assert_eq!(config.close_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_no_timeout() {
        assert!(BehaviorConfig::from_timeout_seconds(None).close_timeout.is_none());
    }
}
