//! External tracker write with bounded retries
//!
//! One initial attempt, then up to `max_retries` more with a fixed delay in
//! between. The delay is cancellable so a surrounding deadline can still cut
//! a close short.

use super::shared::cancellable_sleep;
use crate::config::RetryPolicy;
use crate::ports::tracker::{TrackerClient, TrackerError};
use pointing_domain::{IssueKey, TrackerConnection};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Confirmation of a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateConfirmation {
    /// Attempts used, including the successful one
    pub attempts: usize,
}

/// Why a write did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// Every attempt failed; carries the last failure
    #[error("{last} (after {attempts} attempts)")]
    Exhausted { attempts: usize, last: TrackerError },

    /// Cancelled while waiting for the next attempt
    #[error("Cancelled after {attempts} attempts")]
    Cancelled { attempts: usize },
}

/// Write `value` to `issue_key`, retrying per `policy`.
///
/// `on_attempt_failed` is invoked with the 1-based attempt number after each
/// failed attempt, including the last one.
pub async fn attempt_external_update<T>(
    tracker: &T,
    connection: &TrackerConnection,
    issue_key: &IssueKey,
    value: u64,
    policy: &RetryPolicy,
    cancellation_token: &Option<CancellationToken>,
    mut on_attempt_failed: impl FnMut(usize, &TrackerError),
) -> Result<UpdateConfirmation, UpdateError>
where
    T: TrackerClient + ?Sized,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;
        debug!("Writing {} to {} (attempt {}/{})", value, issue_key, attempt, max_attempts);

        match tracker
            .update_numeric_field(connection, issue_key, value)
            .await
        {
            Ok(()) => return Ok(UpdateConfirmation { attempts: attempt }),
            Err(e) => {
                warn!(
                    "Write to {} failed (attempt {}/{}): {}",
                    issue_key, attempt, max_attempts, e
                );
                on_attempt_failed(attempt, &e);

                if attempt >= max_attempts {
                    return Err(UpdateError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                if !cancellable_sleep(policy.retry_delay, cancellation_token).await {
                    return Err(UpdateError::Cancelled { attempts: attempt });
                }
            }
        }
    }
}
