//! Local session store
//!
//! Keeps every session, issue and vote in memory behind one `RwLock` and,
//! when opened with a path, mirrors the whole state to a JSON file after
//! each mutation. The file is replaced atomically (write to a sibling
//! temporary file, then rename).

use async_trait::async_trait;
use pointing_application::{IssueStore, SessionStore, StoreError, VoteStore, VoteWrite};
use pointing_domain::{Issue, IssueKey, SessionId, SessionState, Vote, VotingSession};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    session: VotingSession,
    /// Stored order is import order
    issues: Vec<Issue>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    sessions: Vec<StoredSession>,
    #[serde(default)]
    votes: Vec<Vote>,
}

impl StoreState {
    fn find(&self, id: &SessionId) -> Option<&StoredSession> {
        self.sessions.iter().find(|s| &s.session.id == id)
    }

    fn find_mut(&mut self, id: &SessionId) -> Option<&mut StoredSession> {
        self.sessions.iter_mut().find(|s| &s.session.id == id)
    }
}

pub struct LocalStore {
    state: RwLock<StoreState>,
    path: Option<PathBuf>,
}

impl LocalStore {
    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            path: None,
        }
    }

    /// Open a file-backed store, starting empty if the file does not exist yet
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Backend(format!("Corrupt store file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "Could not read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        debug!(
            "Opened store {} ({} sessions)",
            path.display(),
            state.sessions.len()
        );
        Ok(Self {
            state: RwLock::new(state),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the current state while the caller still holds the write lock
    async fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let backend = |e: std::io::Error| {
            StoreError::Backend(format!("Could not write {}: {}", path.display(), e))
        };
        let bytes =
            serde_json::to_vec_pretty(state).map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(backend)?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(backend)?;
        tokio::fs::rename(&tmp, path).await.map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for LocalStore {
    async fn get_session(&self, id: &SessionId) -> Result<Option<VotingSession>, StoreError> {
        let state = self.state.read().await;
        Ok(state.find(id).map(|s| s.session.clone()))
    }

    async fn insert_session(
        &self,
        session: VotingSession,
        issues: Vec<Issue>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.find(&session.id).is_some() {
            return Err(StoreError::DuplicateSession(session.id));
        }
        state.sessions.push(StoredSession { session, issues });
        self.persist(&state).await
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .find_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.clone()))?;
        // last writer wins for concurrent closes
        stored.session.state = SessionState::Closed;
        self.persist(&state).await
    }
}

#[async_trait]
impl IssueStore for LocalStore {
    async fn list_issues(&self, session_id: &SessionId) -> Result<Vec<Issue>, StoreError> {
        let state = self.state.read().await;
        state
            .find(session_id)
            .map(|s| s.issues.clone())
            .ok_or_else(|| StoreError::SessionNotFound(session_id.clone()))
    }

    async fn remove_issue(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .find_mut(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.clone()))?;

        let before = stored.issues.len();
        stored.issues.retain(|i| &i.key != issue_key);
        if stored.issues.len() == before {
            return Ok(false);
        }
        self.persist(&state).await?;
        Ok(true)
    }
}

#[async_trait]
impl VoteStore for LocalStore {
    async fn list_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<Vec<Vote>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .votes
            .iter()
            .filter(|v| &v.session_id == session_id && &v.issue_key == issue_key)
            .cloned()
            .collect())
    }

    async fn list_session_votes(&self, session_id: &SessionId) -> Result<Vec<Vote>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .votes
            .iter()
            .filter(|v| &v.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn upsert_vote(&self, vote: Vote) -> Result<VoteWrite, StoreError> {
        let mut state = self.state.write().await;
        let written = match state.votes.iter_mut().find(|v| v.same_slot(&vote)) {
            Some(existing) => {
                *existing = vote;
                VoteWrite::Updated
            }
            None => {
                state.votes.push(vote);
                VoteWrite::Created
            }
        };
        self.persist(&state).await?;
        Ok(written)
    }

    async fn remove_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        let before = state.votes.len();
        state
            .votes
            .retain(|v| !(&v.session_id == session_id && &v.issue_key == issue_key));
        let removed = before - state.votes.len();
        if removed > 0 {
            self.persist(&state).await?;
        }
        Ok(removed)
    }
}
