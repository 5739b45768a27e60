//! Mock ports shared by the use case tests.

use crate::ports::progress::SyncProgressNotifier;
use crate::ports::store::{IssueStore, SessionStore, StoreError, VoteStore, VoteWrite};
use crate::ports::sync_logger::{SyncAuditLogger, SyncEvent};
use crate::ports::tracker::{TrackerClient, TrackerError, TrackerIssue};
use async_trait::async_trait;
use pointing_domain::{
    CloseReport, Estimation, Issue, IssueKey, IssueSyncResult, SessionId, SessionState,
    TrackerConnection, Vote, VoterIdentity, VotingSession,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

// === Store ===

#[derive(Default)]
struct StoreState {
    sessions: Vec<VotingSession>,
    issues: HashMap<SessionId, Vec<Issue>>,
    votes: Vec<Vote>,
}

#[derive(Default)]
pub(crate) struct MockStore {
    state: Mutex<StoreState>,
    broken_vote_lists: Mutex<HashSet<String>>,
    fail_mark_closed: Mutex<bool>,
    mark_closed_calls: Mutex<usize>,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create an open session owned by `creator` with the given issue keys
    pub(crate) fn seed_session(&self, creator: &VoterIdentity, keys: &[&str]) -> VotingSession {
        let connection = TrackerConnection::new("https://tracker.example.com", "token").unwrap();
        let session = VotingSession::new(connection.clone(), "project = PROJ", creator.clone());
        let issues = keys
            .iter()
            .map(|k| {
                let key: IssueKey = k.parse().unwrap();
                let url = connection.browse_url(&key);
                Issue::new(key, format!("Issue {}", k), url)
            })
            .collect();

        let mut state = self.state.lock().unwrap();
        state.sessions.push(session.clone());
        state.issues.insert(session.id.clone(), issues);
        session
    }

    pub(crate) fn seed_votes(&self, session: &VotingSession, key: &str, values: &[&str]) {
        let issue_key: IssueKey = key.parse().unwrap();
        let mut state = self.state.lock().unwrap();
        for (i, value) in values.iter().enumerate() {
            state.votes.push(Vote::new(
                session.id.clone(),
                issue_key.clone(),
                VoterIdentity::guest(&format!("voter-{}", i)).unwrap(),
                Estimation::new(*value),
            ));
        }
    }

    pub(crate) fn close_directly(&self, id: &SessionId) {
        let mut state = self.state.lock().unwrap();
        if let Some(s) = state.sessions.iter_mut().find(|s| &s.id == id) {
            s.state = SessionState::Closed;
        }
    }

    pub(crate) fn break_vote_list(&self, key: &str) {
        self.broken_vote_lists.lock().unwrap().insert(key.to_string());
    }

    pub(crate) fn fail_mark_closed(&self) {
        *self.fail_mark_closed.lock().unwrap() = true;
    }

    pub(crate) fn state_of(&self, id: &SessionId) -> Option<SessionState> {
        let state = self.state.lock().unwrap();
        state.sessions.iter().find(|s| &s.id == id).map(|s| s.state)
    }

    pub(crate) fn mark_closed_calls(&self) -> usize {
        *self.mark_closed_calls.lock().unwrap()
    }

    pub(crate) fn all_votes(&self) -> Vec<Vote> {
        self.state.lock().unwrap().votes.clone()
    }

    pub(crate) fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }
}

#[async_trait]
impl SessionStore for MockStore {
    async fn get_session(&self, id: &SessionId) -> Result<Option<VotingSession>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| &s.id == id).cloned())
    }

    async fn insert_session(
        &self,
        session: VotingSession,
        issues: Vec<Issue>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.issues.insert(session.id.clone(), issues);
        state.sessions.push(session);
        Ok(())
    }

    async fn mark_closed(&self, id: &SessionId) -> Result<(), StoreError> {
        *self.mark_closed_calls.lock().unwrap() += 1;
        if *self.fail_mark_closed.lock().unwrap() {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        match state.sessions.iter_mut().find(|s| &s.id == id) {
            Some(session) => {
                session.state = SessionState::Closed;
                Ok(())
            }
            None => Err(StoreError::SessionNotFound(id.clone())),
        }
    }
}

#[async_trait]
impl IssueStore for MockStore {
    async fn list_issues(&self, session_id: &SessionId) -> Result<Vec<Issue>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.issues.get(session_id).cloned().unwrap_or_default())
    }

    async fn remove_issue(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let Some(issues) = state.issues.get_mut(session_id) else {
            return Ok(false);
        };
        let before = issues.len();
        issues.retain(|i| &i.key != issue_key);
        Ok(issues.len() != before)
    }
}

#[async_trait]
impl VoteStore for MockStore {
    async fn list_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<Vec<Vote>, StoreError> {
        if self.broken_vote_lists.lock().unwrap().contains(issue_key.as_str()) {
            return Err(StoreError::Backend("connection lost".to_string()));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .votes
            .iter()
            .filter(|v| &v.session_id == session_id && &v.issue_key == issue_key)
            .cloned()
            .collect())
    }

    async fn list_session_votes(&self, session_id: &SessionId) -> Result<Vec<Vote>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .votes
            .iter()
            .filter(|v| &v.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn upsert_vote(&self, vote: Vote) -> Result<VoteWrite, StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.votes.iter_mut().find(|v| v.same_slot(&vote)) {
            *existing = vote;
            return Ok(VoteWrite::Updated);
        }
        state.votes.push(vote);
        Ok(VoteWrite::Created)
    }

    async fn remove_votes(
        &self,
        session_id: &SessionId,
        issue_key: &IssueKey,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.lock().unwrap();
        let before = state.votes.len();
        state
            .votes
            .retain(|v| !(&v.session_id == session_id && &v.issue_key == issue_key));
        Ok(before - state.votes.len())
    }
}

// === Tracker ===

#[derive(Default)]
pub(crate) struct MockTracker {
    search_results: Mutex<Vec<TrackerIssue>>,
    search_failure: Mutex<Option<TrackerError>>,
    scripted_failures: Mutex<HashMap<String, VecDeque<TrackerError>>>,
    permanent_failures: Mutex<HashMap<String, TrackerError>>,
    attempts: Mutex<Vec<String>>,
    writes: Mutex<Vec<(String, u64)>>,
}

impl MockTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_search_results(self, issues: Vec<TrackerIssue>) -> Self {
        *self.search_results.lock().unwrap() = issues;
        self
    }

    pub(crate) fn fail_search(self, error: TrackerError) -> Self {
        *self.search_failure.lock().unwrap() = Some(error);
        self
    }

    /// Fail the next writes to `key` with these errors, then succeed
    pub(crate) fn fail_next(self, key: &str, errors: Vec<TrackerError>) -> Self {
        self.scripted_failures
            .lock()
            .unwrap()
            .insert(key.to_string(), errors.into());
        self
    }

    pub(crate) fn always_fail(self, key: &str, error: TrackerError) -> Self {
        self.permanent_failures
            .lock()
            .unwrap()
            .insert(key.to_string(), error);
        self
    }

    /// Successful writes in order
    pub(crate) fn writes(&self) -> Vec<(String, u64)> {
        self.writes.lock().unwrap().clone()
    }

    pub(crate) fn attempts_for(&self, key: &str) -> usize {
        self.attempts.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

#[async_trait]
impl TrackerClient for MockTracker {
    async fn search_issues(
        &self,
        _connection: &TrackerConnection,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<TrackerIssue>, TrackerError> {
        if let Some(error) = self.search_failure.lock().unwrap().clone() {
            return Err(error);
        }
        let issues = self.search_results.lock().unwrap();
        Ok(issues.iter().take(max_results).cloned().collect())
    }

    async fn update_numeric_field(
        &self,
        _connection: &TrackerConnection,
        issue_key: &IssueKey,
        value: u64,
    ) -> Result<(), TrackerError> {
        let key = issue_key.as_str().to_string();
        self.attempts.lock().unwrap().push(key.clone());

        if let Some(error) = self.permanent_failures.lock().unwrap().get(&key) {
            return Err(error.clone());
        }
        if let Some(error) = self
            .scripted_failures
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
        {
            return Err(error);
        }

        self.writes.lock().unwrap().push((key, value));
        Ok(())
    }
}

// === Progress / audit ===

#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
}

impl SyncProgressNotifier for RecordingProgress {
    fn on_close_start(&self, _session_id: &SessionId, total_issues: usize) {
        self.events.lock().unwrap().push(format!("start:{}", total_issues));
    }

    fn on_attempt_failed(
        &self,
        issue_key: &IssueKey,
        attempt: usize,
        max_attempts: usize,
        _error: &TrackerError,
    ) {
        self.events
            .lock()
            .unwrap()
            .push(format!("retry:{}:{}/{}", issue_key, attempt, max_attempts));
    }

    fn on_issue_complete(&self, result: &IssueSyncResult) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}:{}", result.issue_key, result.status));
    }

    fn on_close_complete(&self, report: &CloseReport) {
        self.events
            .lock()
            .unwrap()
            .push(format!("complete:{}", report.can_close));
    }
}

#[derive(Default)]
pub(crate) struct RecordingAuditLogger {
    pub(crate) events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingAuditLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl SyncAuditLogger for RecordingAuditLogger {
    fn log(&self, event: SyncEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
