//! Submit Vote use case

use crate::ports::store::{EstimationStore, StoreError, VoteWrite};
use pointing_domain::{
    DomainError, Estimation, IssueKey, SessionId, Vote, VoterIdentity, require_field,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SubmitVoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session {0} is closed")]
    SessionClosed(SessionId),

    #[error("Issue {0} is not part of this session")]
    IssueNotFound(IssueKey),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default)]
pub struct SubmitVoteInput {
    pub session_id: String,
    pub issue_key: String,
    pub user_id: Option<u64>,
    pub guest_name: Option<String>,
    pub estimation: Option<String>,
}

impl SubmitVoteInput {
    pub fn new(
        session_id: impl Into<String>,
        issue_key: impl Into<String>,
        estimation: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            issue_key: issue_key.into(),
            estimation: Some(estimation.into()),
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

/// Record or overwrite one voter's estimation for one issue
pub struct SubmitVoteUseCase<S: EstimationStore + ?Sized> {
    store: Arc<S>,
}

impl<S: EstimationStore + ?Sized> SubmitVoteUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: SubmitVoteInput) -> Result<VoteWrite, SubmitVoteError> {
        let session_id: SessionId = input.session_id.parse()?;
        let issue_key: IssueKey = input.issue_key.parse()?;
        let voter = VoterIdentity::from_parts(input.user_id, input.guest_name.as_deref())?;
        let estimation =
            Estimation::parse(require_field("estimation", input.estimation.as_deref())?)?;

        let session = self
            .store
            .get_session(&session_id)
            .await?
            .ok_or_else(|| SubmitVoteError::SessionNotFound(session_id.clone()))?;
        if session.is_closed() {
            return Err(SubmitVoteError::SessionClosed(session_id));
        }

        let issues = self.store.list_issues(&session_id).await?;
        if !issues.iter().any(|i| i.key == issue_key) {
            return Err(SubmitVoteError::IssueNotFound(issue_key));
        }

        let written = self
            .store
            .upsert_vote(Vote::new(session_id, issue_key.clone(), voter.clone(), estimation))
            .await?;
        debug!("Vote by {} on {}: {:?}", voter, issue_key, written);
        Ok(written)
    }
}
