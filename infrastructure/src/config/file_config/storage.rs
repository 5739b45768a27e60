//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Session store file. Defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured path, or `$XDG_DATA_HOME/pointing-quorum/sessions.json`
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join("pointing-quorum").join("sessions.json"))
        })
    }
}
