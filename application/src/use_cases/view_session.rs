//! View Session use case
//!
//! Read-only snapshot of a session with a consensus preview per issue.
//! Nothing is written to the tracker.

use crate::config::SyncParams;
use crate::ports::store::{EstimationStore, StoreError};
use pointing_domain::{
    ConsensusResult, DomainError, Issue, SessionId, SessionState, Vote, VoterIdentity,
    VotingSession, compute_consensus,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewSessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Session metadata safe to display (no credential)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub tracker_url: String,
    pub query: String,
    pub creator: VoterIdentity,
    pub state: SessionState,
    pub created_at: u64,
}

impl From<&VotingSession> for SessionSummary {
    fn from(session: &VotingSession) -> Self {
        Self {
            id: session.id.clone(),
            tracker_url: session.tracker.base_url().to_string(),
            query: session.query.clone(),
            creator: session.creator.clone(),
            state: session.state,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueView {
    pub issue: Issue,
    pub votes: Vec<Vote>,
    pub preview: ConsensusResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session: SessionSummary,
    /// Issues in stored order
    pub issues: Vec<IssueView>,
}

impl SessionView {
    pub fn vote_count(&self) -> usize {
        self.issues.iter().map(|i| i.votes.len()).sum()
    }
}

pub struct ViewSessionUseCase<S: EstimationStore + ?Sized> {
    store: Arc<S>,
    params: SyncParams,
}

impl<S: EstimationStore + ?Sized> ViewSessionUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            params: SyncParams::default(),
        }
    }

    pub fn with_params(mut self, params: SyncParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(&self, session_id: &str) -> Result<SessionView, ViewSessionError> {
        let session_id: SessionId = session_id.parse()?;
        let session = self
            .store
            .get_session(&session_id)
            .await?
            .ok_or_else(|| ViewSessionError::SessionNotFound(session_id.clone()))?;

        let issues = self.store.list_issues(&session_id).await?;
        let mut votes = self.store.list_session_votes(&session_id).await?;
        let scale = self.params.scale();

        let issues = issues
            .into_iter()
            .map(|issue| {
                let (mine, rest): (Vec<Vote>, Vec<Vote>) =
                    votes.drain(..).partition(|v| v.issue_key == issue.key);
                votes = rest;
                let preview = compute_consensus(mine.iter().map(|v| &v.estimation), &scale);
                IssueView {
                    issue,
                    votes: mine,
                    preview,
                }
            })
            .collect();

        Ok(SessionView {
            session: SessionSummary::from(&session),
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockStore;

    #[tokio::test]
    async fn test_groups_votes_and_previews_consensus() {
        let store = Arc::new(MockStore::new());
        let session = store.seed_session(&VoterIdentity::user(1), &["A-1", "A-2"]);
        store.seed_votes(&session, "A-2", &["8", "13", "?"]);

        let view = ViewSessionUseCase::new(store)
            .execute(session.id.as_str())
            .await
            .unwrap();

        assert_eq!(view.session.tracker_url, "https://tracker.example.com");
        assert_eq!(view.issues[0].issue.key.as_str(), "A-1");
        assert!(view.issues[0].votes.is_empty());
        assert!(view.issues[0].preview.is_skipped());
        assert_eq!(view.issues[1].votes.len(), 3);
        assert_eq!(view.issues[1].preview.elected(), Some(13));
        assert_eq!(view.vote_count(), 3);
    }

    #[tokio::test]
    async fn test_view_never_exposes_credential() {
        let store = Arc::new(MockStore::new());
        let session = store.seed_session(&VoterIdentity::user(1), &["A-1"]);

        let view = ViewSessionUseCase::new(store)
            .execute(session.id.as_str())
            .await
            .unwrap();

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("token"));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = Arc::new(MockStore::new());
        let err = ViewSessionUseCase::new(store)
            .execute(SessionId::generate().as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, ViewSessionError::SessionNotFound(_)));
    }
}
