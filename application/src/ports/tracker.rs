//! Issue tracker port
//!
//! Defines the interface for talking to the external issue tracker.

use async_trait::async_trait;
use pointing_domain::{IssueKey, TrackerConnection};
use thiserror::Error;

/// Errors that can occur while talking to the tracker
///
/// Every variant is treated as transient by the retry policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The tracker answered but did not confirm success
    #[error("Tracker responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never got a response (DNS, TLS, timeout, ...)
    #[error("Connection error: {0}")]
    Transport(String),

    /// The tracker answered with something we could not interpret
    #[error("Invalid tracker response: {0}")]
    InvalidResponse(String),
}

impl TrackerError {
    /// The tracker explicitly refused or failed the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, TrackerError::Status { .. })
    }
}

/// Issue as returned by a tracker search, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerIssue {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub story_points: Option<f64>,
}

/// Client for the external issue tracker
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Run an opaque tracker query and return matching issues
    async fn search_issues(
        &self,
        connection: &TrackerConnection,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<TrackerIssue>, TrackerError>;

    /// Write the story-point value of one issue. A single network write.
    async fn update_numeric_field(
        &self,
        connection: &TrackerConnection,
        issue_key: &IssueKey,
        value: u64,
    ) -> Result<(), TrackerError>;
}
