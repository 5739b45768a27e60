//! Infrastructure layer for pointing-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod jira;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileStorageConfig,
    FileSyncConfig, FileTrackerConfig,
};
pub use jira::JiraTrackerClient;
pub use logging::JsonlSyncLogger;
pub use storage::LocalStore;
