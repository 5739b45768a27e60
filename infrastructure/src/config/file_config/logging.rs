//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail of tracker writes and close decisions
    pub audit_log: Option<PathBuf>,
    /// Also write diagnostics to this file (daily rotation)
    pub file: Option<PathBuf>,
}
