//! Configuration file loading for pointing-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `POINTING_<SECTION>__<KEY>` (e.g. `POINTING_TRACKER__TOKEN`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./pointing.toml` or `./.pointing.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/pointing-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_ACCEPTANCE_CRITERIA_FIELD, DEFAULT_STORY_POINTS_FIELD,
    FileConfig, FileLoggingConfig, FileStorageConfig, FileSyncConfig, FileTrackerConfig,
};
pub use loader::ConfigLoader;
