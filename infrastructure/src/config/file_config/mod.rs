//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversions into application parameters live here as well.

mod logging;
mod storage;
mod sync;
mod tracker;

pub use logging::FileLoggingConfig;
pub use storage::FileStorageConfig;
pub use sync::FileSyncConfig;
pub use tracker::{
    DEFAULT_ACCEPTANCE_CRITERIA_FIELD, DEFAULT_STORY_POINTS_FIELD, FileTrackerConfig,
};

use pointing_application::{BehaviorConfig, RetryPolicy, SyncParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("sync.scale_ceiling must be at least 2")]
    ScaleCeilingTooSmall,

    #[error("{0} cannot be empty")]
    EmptyFieldId(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub tracker: FileTrackerConfig,
    pub sync: FileSyncConfig,
    pub storage: FileStorageConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.tracker.max_results == 0 {
            return Err(ConfigValidationError::ZeroValue("tracker.max_results"));
        }
        if self.tracker.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::ZeroValue(
                "tracker.request_timeout_seconds",
            ));
        }
        if self.tracker.story_points_field.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFieldId(
                "tracker.story_points_field",
            ));
        }
        if self.tracker.acceptance_criteria_field.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFieldId(
                "tracker.acceptance_criteria_field",
            ));
        }
        if self.sync.scale_ceiling < 2 {
            return Err(ConfigValidationError::ScaleCeilingTooSmall);
        }
        if let Some(0) = self.sync.close_timeout_seconds {
            return Err(ConfigValidationError::ZeroValue("sync.close_timeout_seconds"));
        }
        Ok(())
    }

    pub fn sync_params(&self) -> SyncParams {
        SyncParams::default()
            .with_retry(RetryPolicy::new(
                self.sync.max_retries,
                Duration::from_millis(self.sync.retry_delay_ms),
            ))
            .with_scale_ceiling(self.sync.scale_ceiling)
            .with_max_search_results(self.tracker.max_results)
    }

    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.sync.close_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[tracker]
base_url = "https://issues.example.com"
token = "abc"
max_results = 20

[sync]
max_retries = 3
retry_delay_ms = 250
scale_ceiling = 40
close_timeout_seconds = 60

[storage]
path = "/tmp/pointing/sessions.json"

[logging]
audit_log = "/tmp/pointing/audit.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());

        let params = config.sync_params();
        assert_eq!(params.retry.max_attempts(), 4);
        assert_eq!(params.retry.retry_delay, Duration::from_millis(250));
        assert_eq!(params.scale().max(), 55);
        assert_eq!(params.max_search_results, 20);
        assert_eq!(
            config.behavior().close_timeout,
            Some(Duration::from_secs(60))
        );
        assert!(config.logging.audit_log.is_some());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sync_params().retry, RetryPolicy::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.sync.scale_ceiling = 1;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ScaleCeilingTooSmall)
        );

        let mut config = FileConfig::default();
        config.sync.close_timeout_seconds = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("sync.close_timeout_seconds"))
        );

        let mut config = FileConfig::default();
        config.tracker.story_points_field = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyFieldId(_))
        ));

        let toml_str = r#"
[tracker]
max_results = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("tracker.max_results"))
        );
    }
}
