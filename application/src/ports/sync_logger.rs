//! Port for structured synchronization audit logging.
//!
//! Defines the [`SyncAuditLogger`] trait for recording every external write
//! attempt and every close decision. Writes that already reached the tracker
//! are not rolled back when a close is rejected, so this trail is how an
//! operator reconciles the tracker with sessions that stayed open.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures machine-readable
//! records (JSONL).

use serde_json::Value;

/// A structured synchronization event.
pub struct SyncEvent {
    /// Event type identifier (e.g., "write_attempt_failed", "issue_synced").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SyncEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging synchronization events.
///
/// `log` is synchronous and infallible; logging failures never disturb a
/// close operation.
pub trait SyncAuditLogger: Send + Sync {
    fn log(&self, event: SyncEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoSyncAuditLogger;

impl SyncAuditLogger for NoSyncAuditLogger {
    fn log(&self, _event: SyncEvent) {}
}
