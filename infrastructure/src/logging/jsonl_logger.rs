//! Append-only JSONL audit trail for tracker synchronization.
//!
//! Each [`SyncEvent`] becomes one JSON line carrying its payload fields plus
//! `type` and `timestamp`. The file is opened in append mode so records from
//! earlier closes of the same session stay next to the new ones.

use pointing_application::ports::sync_logger::{SyncAuditLogger, SyncEvent};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL audit logger, one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Every record is flushed.
pub struct JsonlSyncLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSyncLogger {
    /// Open (or create) the audit file at `path`.
    ///
    /// Returns `None` if the file cannot be opened; closing still works
    /// without an audit trail.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create audit log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: SyncEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl SyncAuditLogger for JsonlSyncLogger {
    fn log(&self, event: SyncEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Audit log write to {} failed: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlSyncLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
