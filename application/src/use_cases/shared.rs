//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the cancellable sleep used between
//! external write attempts.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Sleep for `duration` unless the token fires first.
///
/// Returns `false` if the sleep was interrupted by cancellation.
pub(crate) async fn cancellable_sleep(
    duration: Duration,
    token: &Option<CancellationToken>,
) -> bool {
    match token {
        Some(token) => {
            tokio::select! {
                _ = tokio::time::sleep(duration) => true,
                _ = token.cancelled() => false,
            }
        }
        None => {
            tokio::time::sleep(duration).await;
            true
        }
    }
}
