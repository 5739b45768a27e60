//! Create Session use case
//!
//! Imports the issues matching a tracker query and stores them together
//! with a new open session.

use crate::config::SyncParams;
use crate::ports::store::{EstimationStore, StoreError};
use crate::ports::tracker::{TrackerClient, TrackerError, TrackerIssue};
use pointing_domain::{
    DomainError, Issue, IssueKey, SessionId, TrackerConnection, VoterIdentity, VotingSession,
    require_field,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while creating a session
#[derive(Error, Debug)]
pub enum CreateSessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Tracker unavailable: {0}")]
    TrackerUnavailable(TrackerError),

    #[error("The query matched no issues")]
    NoIssuesFound,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Input for creating a session
#[derive(Debug, Clone, Default)]
pub struct CreateSessionInput {
    pub tracker_url: Option<String>,
    pub tracker_token: Option<String>,
    pub query: Option<String>,
    /// Registered creator
    pub user_id: Option<u64>,
    /// Guest creator
    pub guest_name: Option<String>,
}

impl CreateSessionInput {
    pub fn new(
        tracker_url: impl Into<String>,
        tracker_token: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            tracker_url: Some(tracker_url.into()),
            tracker_token: Some(tracker_token.into()),
            query: Some(query.into()),
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

/// Output of a successful creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSessionOutput {
    pub session_id: SessionId,
    pub issues_count: usize,
}

/// Use case for creating a voting session
pub struct CreateSessionUseCase<S: EstimationStore + ?Sized, T: TrackerClient + ?Sized> {
    store: Arc<S>,
    tracker: Arc<T>,
    params: SyncParams,
}

impl<S: EstimationStore + ?Sized, T: TrackerClient + ?Sized> CreateSessionUseCase<S, T> {
    pub fn new(store: Arc<S>, tracker: Arc<T>) -> Self {
        Self {
            store,
            tracker,
            params: SyncParams::default(),
        }
    }

    pub fn with_params(mut self, params: SyncParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(
        &self,
        input: CreateSessionInput,
    ) -> Result<CreateSessionOutput, CreateSessionError> {
        let tracker_url = require_field("tracker_url", input.tracker_url.as_deref())?;
        let token = require_field("tracker_token", input.tracker_token.as_deref())?;
        let query = require_field("query", input.query.as_deref())?;
        let creator = VoterIdentity::from_parts(input.user_id, input.guest_name.as_deref())?;
        let connection = TrackerConnection::new(tracker_url, token)?;

        info!("Searching {} for: {}", connection.base_url(), query);
        let found = self
            .tracker
            .search_issues(&connection, query, self.params.max_search_results)
            .await
            .map_err(CreateSessionError::TrackerUnavailable)?;

        let issues: Vec<Issue> = found
            .into_iter()
            .filter_map(|raw| import_issue(&connection, raw))
            .collect();
        if issues.is_empty() {
            return Err(CreateSessionError::NoIssuesFound);
        }

        let session = VotingSession::new(connection, query, creator);
        let output = CreateSessionOutput {
            session_id: session.id.clone(),
            issues_count: issues.len(),
        };
        self.store.insert_session(session, issues).await?;

        info!(
            "Created session {} with {} issues",
            output.session_id, output.issues_count
        );
        Ok(output)
    }
}

fn import_issue(connection: &TrackerConnection, raw: TrackerIssue) -> Option<Issue> {
    let key: IssueKey = match raw.key.parse() {
        Ok(key) => key,
        Err(e) => {
            warn!("Ignoring tracker issue with unusable key '{}': {}", raw.key, e);
            return None;
        }
    };

    let url = connection.browse_url(&key);
    let mut issue = Issue::new(key, raw.title, url);
    if let Some(description) = raw.description {
        issue = issue.with_description(description);
    }
    if let Some(criteria) = raw.acceptance_criteria {
        issue = issue.with_acceptance_criteria(criteria);
    }
    if let Some(points) = raw.story_points {
        issue = issue.with_current_story_points(points);
    }
    Some(issue)
}
