//! Voting session entities

use super::vote::VoterIdentity;
use crate::core::error::DomainError;
use crate::core::ids::{IssueKey, SessionId};
use crate::util::current_timestamp;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a voting session
///
/// The only transition is `Open -> Closed`, and it happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Open,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Secret used to authenticate against the issue tracker
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Where and how to reach the issue tracker for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConnection {
    base_url: String,
    credential: Credential,
}

impl TrackerConnection {
    /// Build a connection, trimming trailing slashes from the base URL
    pub fn new(base_url: &str, credential: &str) -> Result<Self, DomainError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DomainError::MissingField("tracker_url"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DomainError::invalid(
                "tracker_url",
                "must start with http:// or https://",
            ));
        }
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(DomainError::MissingField("tracker_token"));
        }
        Ok(Self {
            base_url: base_url.to_string(),
            credential: Credential::new(credential),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Browser URL of an issue
    pub fn browse_url(&self, key: &IssueKey) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}

/// An issue imported from the tracker into a session (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub key: IssueKey,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
    /// Story points already recorded in the tracker at import time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_story_points: Option<f64>,
    pub url: String,
}

impl Issue {
    pub fn new(key: IssueKey, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            description: None,
            acceptance_criteria: None,
            current_story_points: None,
            url: url.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_acceptance_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.acceptance_criteria = Some(criteria.into());
        self
    }

    pub fn with_current_story_points(mut self, points: f64) -> Self {
        self.current_story_points = Some(points);
        self
    }
}

/// A bounded voting round over a set of issues (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingSession {
    pub id: SessionId,
    pub tracker: TrackerConnection,
    /// Opaque tracker query the issues were imported with
    pub query: String,
    pub creator: VoterIdentity,
    #[serde(default)]
    pub state: SessionState,
    /// Creation time (milliseconds since epoch)
    pub created_at: u64,
}

impl VotingSession {
    pub fn new(tracker: TrackerConnection, query: impl Into<String>, creator: VoterIdentity) -> Self {
        Self {
            id: SessionId::generate(),
            tracker,
            query: query.into(),
            creator,
            state: SessionState::Open,
            created_at: current_timestamp(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Only the creator may close or manage a session
    pub fn is_managed_by(&self, requester: &VoterIdentity) -> bool {
        &self.creator == requester
    }

    /// Flip to closed. Returns `false` if the session was already closed.
    pub fn close(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        self.state = SessionState::Closed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> TrackerConnection {
        TrackerConnection::new("https://tracker.example.com/", "secret").unwrap()
    }

    #[test]
    fn test_connection_trims_trailing_slash() {
        let conn = connection();
        assert_eq!(conn.base_url(), "https://tracker.example.com");
        let key: IssueKey = "PROJ-1".parse().unwrap();
        assert_eq!(
            conn.browse_url(&key),
            "https://tracker.example.com/browse/PROJ-1"
        );
    }

    #[test]
    fn test_connection_validation() {
        assert_eq!(
            TrackerConnection::new("  ", "secret"),
            Err(DomainError::MissingField("tracker_url"))
        );
        assert!(matches!(
            TrackerConnection::new("tracker.example.com", "secret"),
            Err(DomainError::InvalidField { field: "tracker_url", .. })
        ));
        assert_eq!(
            TrackerConnection::new("https://tracker.example.com", ""),
            Err(DomainError::MissingField("tracker_token"))
        );
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let conn = connection();
        let debug = format!("{:?}", conn);
        assert!(!debug.contains("secret"));
        assert_eq!(conn.credential().expose(), "secret");
    }

    #[test]
    fn test_close_is_one_way() {
        let creator = VoterIdentity::guest("alice").unwrap();
        let mut session = VotingSession::new(connection(), "project = PROJ", creator.clone());
        assert!(session.is_open());
        assert!(session.is_managed_by(&creator));
        assert!(!session.is_managed_by(&VoterIdentity::guest("bob").unwrap()));

        assert!(session.close());
        assert!(session.is_closed());
        assert!(!session.close());
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let session = VotingSession::new(
            connection(),
            "project = PROJ",
            VoterIdentity::user(7),
        );
        let json = serde_json::to_string(&session).unwrap();
        let back: VotingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
