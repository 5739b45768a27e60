//! Remove Issue use case

use crate::ports::store::{EstimationStore, StoreError};
use pointing_domain::{DomainError, IssueKey, SessionId, VoterIdentity};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RemoveIssueError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Only the session creator can remove issues")]
    NotCreator,

    #[error("Session {0} is closed")]
    SessionClosed(SessionId),

    #[error("Issue {0} is not part of this session")]
    IssueNotFound(IssueKey),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default)]
pub struct RemoveIssueInput {
    pub session_id: String,
    pub issue_key: String,
    pub user_id: Option<u64>,
    pub guest_name: Option<String>,
}

impl RemoveIssueInput {
    pub fn new(session_id: impl Into<String>, issue_key: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            issue_key: issue_key.into(),
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

/// Drop an issue (and its votes) from an open session
pub struct RemoveIssueUseCase<S: EstimationStore + ?Sized> {
    store: Arc<S>,
}

impl<S: EstimationStore + ?Sized> RemoveIssueUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the number of votes removed with the issue
    pub async fn execute(&self, input: RemoveIssueInput) -> Result<usize, RemoveIssueError> {
        let session_id: SessionId = input.session_id.parse()?;
        let issue_key: IssueKey = input.issue_key.parse()?;
        let requester = VoterIdentity::from_parts(input.user_id, input.guest_name.as_deref())?;

        let session = self
            .store
            .get_session(&session_id)
            .await?
            .ok_or_else(|| RemoveIssueError::SessionNotFound(session_id.clone()))?;
        if !session.is_managed_by(&requester) {
            return Err(RemoveIssueError::NotCreator);
        }
        if session.is_closed() {
            return Err(RemoveIssueError::SessionClosed(session_id));
        }

        if !self.store.remove_issue(&session_id, &issue_key).await? {
            return Err(RemoveIssueError::IssueNotFound(issue_key));
        }
        let removed_votes = self.store.remove_votes(&session_id, &issue_key).await?;

        info!(
            "Removed {} from session {} ({} votes)",
            issue_key, session_id, removed_votes
        );
        Ok(removed_votes)
    }
}
