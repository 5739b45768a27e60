//! Close Session use case
//!
//! Computes consensus for every issue of a session, writes the elected
//! value to the tracker and flips the session to closed only when no issue
//! ended `failed` or `error`.
//!
//! Writes that already succeeded are not undone when the close is rejected.
//! Running the close again recomputes every consensus and rewrites the same
//! values, so a retry after fixing the tracker side is safe.

use super::external_update::{UpdateError, attempt_external_update};
use super::shared::is_cancelled;
use crate::config::SyncParams;
use crate::ports::progress::{NoSyncProgress, SyncProgressNotifier};
use crate::ports::store::{EstimationStore, StoreError};
use crate::ports::sync_logger::{NoSyncAuditLogger, SyncAuditLogger, SyncEvent};
use crate::ports::tracker::{TrackerClient, TrackerError};
use pointing_domain::{
    CloseReport, ConsensusResult, DomainError, EstimationScale, Issue, IssueSyncResult,
    SessionId, VoterIdentity, VotingSession, compute_consensus,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Message recorded for an issue whose votes could not be read
const VOTE_LOAD_FAILURE: &str = "Could not load votes for this issue";

/// Errors that abort a close as a whole
#[derive(Error, Debug)]
pub enum CloseSessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Only the session creator can close the session")]
    NotCreator,

    #[error("Session {0} is already closed")]
    AlreadyClosed(SessionId),

    #[error("Close was cancelled; the session stays open")]
    Cancelled,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Input for closing a session
#[derive(Debug, Clone, Default)]
pub struct CloseSessionInput {
    pub session_id: String,
    /// Registered requester
    pub user_id: Option<u64>,
    /// Guest requester
    pub guest_name: Option<String>,
}

impl CloseSessionInput {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    pub fn as_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn as_guest(mut self, name: impl Into<String>) -> Self {
        self.guest_name = Some(name.into());
        self
    }
}

/// Use case for closing a session (the synchronization coordinator)
pub struct CloseSessionUseCase<S: EstimationStore + ?Sized, T: TrackerClient + ?Sized> {
    store: Arc<S>,
    tracker: Arc<T>,
    params: SyncParams,
    audit: Arc<dyn SyncAuditLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<S: EstimationStore + ?Sized, T: TrackerClient + ?Sized> CloseSessionUseCase<S, T> {
    pub fn new(store: Arc<S>, tracker: Arc<T>) -> Self {
        Self {
            store,
            tracker,
            params: SyncParams::default(),
            audit: Arc::new(NoSyncAuditLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: SyncParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn SyncAuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute without progress reporting
    pub async fn execute(&self, input: CloseSessionInput) -> Result<CloseReport, CloseSessionError> {
        self.execute_with_progress(input, &NoSyncProgress).await
    }

    /// Execute with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: CloseSessionInput,
        progress: &dyn SyncProgressNotifier,
    ) -> Result<CloseReport, CloseSessionError> {
        let session_id: SessionId = input.session_id.parse()?;
        let requester =
            VoterIdentity::from_parts(input.user_id, input.guest_name.as_deref())?;

        let session = self
            .store
            .get_session(&session_id)
            .await?
            .ok_or_else(|| CloseSessionError::SessionNotFound(session_id.clone()))?;

        if !session.is_managed_by(&requester) {
            warn!("{} tried to close session {} they do not own", requester, session_id);
            return Err(CloseSessionError::NotCreator);
        }
        if session.is_closed() {
            return Err(CloseSessionError::AlreadyClosed(session_id));
        }

        let issues = self.store.list_issues(&session_id).await?;
        let scale = self.params.scale();

        info!("Closing session {} ({} issues)", session_id, issues.len());
        progress.on_close_start(&session_id, issues.len());

        let mut results = Vec::with_capacity(issues.len());
        for issue in &issues {
            if is_cancelled(&self.cancellation_token) {
                info!("Close of session {} cancelled", session_id);
                return Err(CloseSessionError::Cancelled);
            }

            progress.on_issue_start(&issue.key);
            let result = self
                .sync_issue(&session, issue, &scale, progress)
                .await
                .ok_or(CloseSessionError::Cancelled)?;
            self.audit.log(SyncEvent::new(
                "issue_synced",
                json!({
                    "session_id": session_id.as_str(),
                    "issue_key": result.issue_key.as_str(),
                    "status": result.status.as_str(),
                    "average": result.display_average(),
                    "elected_value": result.elected_value,
                    "reason": result.reason,
                }),
            ));
            progress.on_issue_complete(&result);
            results.push(result);
        }

        let report = CloseReport::from_results(session_id.clone(), results);
        self.audit.log(SyncEvent::new(
            "close_decision",
            json!({
                "session_id": session_id.as_str(),
                "can_close": report.can_close,
                "summary": report.summary(),
                "blocking": report
                    .blocking()
                    .map(|r| r.issue_key.as_str())
                    .collect::<Vec<_>>(),
            }),
        ));

        let report = if report.can_close {
            if is_cancelled(&self.cancellation_token) {
                info!("Close of session {} cancelled before marking it closed", session_id);
                return Err(CloseSessionError::Cancelled);
            }
            self.store.mark_closed(&session_id).await?;
            info!("Session {} closed: {}", session_id, report.summary());
            report.with_closed(true)
        } else {
            warn!(
                "Session {} stays open: {}",
                session_id,
                report.summary()
            );
            report
        };

        progress.on_close_complete(&report);
        Ok(report)
    }

    /// Process one issue. `None` means cancelled during a retry wait.
    async fn sync_issue(
        &self,
        session: &VotingSession,
        issue: &Issue,
        scale: &EstimationScale,
        progress: &dyn SyncProgressNotifier,
    ) -> Option<IssueSyncResult> {
        let votes = match self.store.list_votes(&session.id, &issue.key).await {
            Ok(votes) => votes,
            Err(e) => {
                error!("Loading votes for {} failed: {}", issue.key, e);
                return Some(IssueSyncResult::error(issue.key.clone(), VOTE_LOAD_FAILURE));
            }
        };

        let consensus = compute_consensus(votes.iter().map(|v| &v.estimation), scale);
        let elected = match &consensus {
            ConsensusResult::Skipped { reason } => {
                debug!("Skipping {}: {}", issue.key, reason);
                return Some(IssueSyncResult::skipped(issue.key.clone(), *reason));
            }
            ConsensusResult::Elected { elected, .. } => *elected,
        };

        let max_attempts = self.params.retry.max_attempts();
        let outcome = attempt_external_update(
            self.tracker.as_ref(),
            &session.tracker,
            &issue.key,
            elected,
            &self.params.retry,
            &self.cancellation_token,
            |attempt, e| {
                progress.on_attempt_failed(&issue.key, attempt, max_attempts, e);
                self.audit.log(SyncEvent::new(
                    "write_attempt_failed",
                    json!({
                        "session_id": session.id.as_str(),
                        "issue_key": issue.key.as_str(),
                        "value": elected,
                        "attempt": attempt,
                        "max_attempts": max_attempts,
                        "error": e.to_string(),
                    }),
                ));
            },
        )
        .await;

        let result = match outcome {
            Ok(confirmation) => {
                debug!(
                    "{} set to {} after {} attempt(s)",
                    issue.key, elected, confirmation.attempts
                );
                IssueSyncResult::success(issue.key.clone(), &consensus)
            }
            Err(UpdateError::Cancelled { .. }) => return None,
            Err(e) => {
                let rejected = matches!(
                    e,
                    UpdateError::Exhausted {
                        last: TrackerError::Status { .. },
                        ..
                    }
                );
                if rejected {
                    IssueSyncResult::failed(issue.key.clone(), &consensus, e.to_string())
                } else {
                    IssueSyncResult::error(issue.key.clone(), e.to_string())
                        .with_consensus(&consensus)
                }
            }
        };
        Some(result)
    }
}
