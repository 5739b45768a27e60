//! Storage ports
//!
//! Persistence of sessions, issues and votes is an external collaborator.
//! The use cases only rely on the contracts below; infrastructure adapters
//! provide the implementations.

use async_trait::async_trait;
use pointing_domain::{Issue, IssueKey, SessionId, Vote, VotingSession};
use thiserror::Error;

/// Errors reported by storage adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session already exists: {0}")]
    DuplicateSession(SessionId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Whether an upsert created a new vote or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteWrite {
    Created,
    Updated,
}

/// Session persistence
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_session(&self, id: &SessionId) -> Result<Option<VotingSession>, StoreError>;

    /// Persist a new session together with its imported issues
    async fn insert_session(
        &self,
        session: VotingSession,
        issues: Vec<Issue>,
    ) -> Result<(), StoreError>;

    /// Single persisted `open -> closed` transition
    async fn mark_closed(&self, id: &SessionId) -> Result<(), StoreError>;
}

/// Issue persistence
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Issues of a session in stored order
    async fn list_issues(&self, session_id: &SessionId) -> Result<Vec<Issue>, StoreError>;

    /// Remove one issue. Returns `false` if it was not part of the session.
    async fn remove_issue(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<bool, StoreError>;
}

/// Vote persistence
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Votes for one issue in submission order
    async fn list_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<Vec<Vote>, StoreError>;

    /// All votes of a session
    async fn list_session_votes(&self, session_id: &SessionId) -> Result<Vec<Vote>, StoreError>;

    /// Insert or overwrite the vote for `(session, issue, voter)`.
    ///
    /// Last writer wins when submissions for the same slot race.
    async fn upsert_vote(&self, vote: Vote) -> Result<VoteWrite, StoreError>;

    /// Delete every vote for one issue, returning how many were removed
    async fn remove_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<usize, StoreError>;
}

/// Convenience bound for adapters that provide all three stores
pub trait EstimationStore: SessionStore + IssueStore + VoteStore {}

impl<T: SessionStore + IssueStore + VoteStore> EstimationStore for T {}
