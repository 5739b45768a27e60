//! Progress reporting while a session is closed

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pointing_application::{SyncProgressNotifier, TrackerError};
use pointing_domain::{CloseReport, IssueKey, IssueSyncResult, IssueSyncStatus, SessionId};
use std::sync::Mutex;

/// Reports close progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn status_mark(status: IssueSyncStatus) -> colored::ColoredString {
    match status {
        IssueSyncStatus::Success => "v".green(),
        IssueSyncStatus::Skipped => "-".dimmed(),
        IssueSyncStatus::Failed | IssueSyncStatus::Error => "x".red(),
    }
}

impl SyncProgressNotifier for ProgressReporter {
    fn on_close_start(&self, _session_id: &SessionId, total_issues: usize) {
        let bar = ProgressBar::new(total_issues as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Syncing");
        bar.set_message("Starting...");
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_issue_start(&self, issue_key: &IssueKey) {
        self.with_bar(|bar| bar.set_message(issue_key.to_string()));
    }

    fn on_attempt_failed(
        &self,
        issue_key: &IssueKey,
        attempt: usize,
        max_attempts: usize,
        _error: &TrackerError,
    ) {
        self.with_bar(|bar| {
            bar.set_message(format!(
                "{} attempt {}/{} failed",
                issue_key,
                attempt,
                max_attempts
            ))
        });
    }

    fn on_issue_complete(&self, result: &IssueSyncResult) {
        self.with_bar(|bar| {
            bar.set_message(format!("{} {}", status_mark(result.status), result.issue_key));
            bar.inc(1);
        });
    }

    fn on_close_complete(&self, report: &CloseReport) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            let message = if report.can_close {
                "done".green()
            } else {
                "blocked".red()
            };
            bar.finish_with_message(message.to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SyncProgressNotifier for SimpleProgress {
    fn on_close_start(&self, session_id: &SessionId, total_issues: usize) {
        eprintln!(
            "{} {} ({} issues)",
            "->".cyan(),
            format!("Closing {}", session_id).bold(),
            total_issues
        );
    }

    fn on_attempt_failed(
        &self,
        issue_key: &IssueKey,
        attempt: usize,
        max_attempts: usize,
        error: &TrackerError,
    ) {
        eprintln!(
            "  {} {} attempt {}/{}: {}",
            "!".yellow(),
            issue_key,
            attempt,
            max_attempts,
            error
        );
    }

    fn on_issue_complete(&self, result: &IssueSyncResult) {
        eprintln!("  {} {} {}", status_mark(result.status), result.issue_key, result.status);
    }
}
