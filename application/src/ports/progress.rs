//! Progress notification port
//!
//! Defines the interface for reporting progress while a session is closed.

use super::tracker::TrackerError;
use pointing_domain::{CloseReport, IssueKey, IssueSyncResult, SessionId};

/// Callback for progress updates during session close
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, ...).
pub trait SyncProgressNotifier: Send + Sync {
    /// Called once before the first issue is processed
    fn on_close_start(&self, session_id: &SessionId, total_issues: usize);

    /// Called when an issue starts processing
    fn on_issue_start(&self, _issue_key: &IssueKey) {}

    /// Called after each failed write attempt
    fn on_attempt_failed(
        &self,
        _issue_key: &IssueKey,
        _attempt: usize,
        _max_attempts: usize,
        _error: &TrackerError,
    ) {
    }

    /// Called when an issue has its final status
    fn on_issue_complete(&self, result: &IssueSyncResult);

    /// Called once with the aggregated report
    fn on_close_complete(&self, _report: &CloseReport) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoSyncProgress;

impl SyncProgressNotifier for NoSyncProgress {
    fn on_close_start(&self, _session_id: &SessionId, _total_issues: usize) {}
    fn on_issue_complete(&self, _result: &IssueSyncResult) {}
}
