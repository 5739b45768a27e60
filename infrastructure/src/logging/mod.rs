//! Logging infrastructure (structured synchronization audit logging).
//!
//! Provides [`JsonlSyncLogger`], a JSONL file writer that implements
//! the [`SyncAuditLogger`](pointing_application::SyncAuditLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSyncLogger;
