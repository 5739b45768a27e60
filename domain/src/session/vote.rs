//! Vote entity and voter identity

use crate::core::error::DomainError;
use crate::core::ids::{IssueKey, SessionId};
use crate::estimation::Estimation;
use crate::util::current_timestamp;
use serde::{Deserialize, Serialize};

/// Maximum length of a guest voter name
const MAX_GUEST_NAME_LEN: usize = 100;

/// Who cast a vote: an authenticated user or a free-text guest name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoterIdentity {
    User { id: u64 },
    Guest { name: String },
}

impl VoterIdentity {
    pub fn user(id: u64) -> Self {
        VoterIdentity::User { id }
    }

    pub fn guest(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingField("voter_name"));
        }
        if name.chars().count() > MAX_GUEST_NAME_LEN {
            return Err(DomainError::invalid(
                "voter_name",
                format!("longer than {} characters", MAX_GUEST_NAME_LEN),
            ));
        }
        Ok(VoterIdentity::Guest {
            name: name.to_string(),
        })
    }

    /// Build from the two mutually exclusive caller inputs
    pub fn from_parts(user_id: Option<u64>, guest_name: Option<&str>) -> Result<Self, DomainError> {
        match (user_id, guest_name) {
            (Some(_), Some(_)) => Err(DomainError::invalid(
                "voter",
                "give either a user id or a guest name, not both",
            )),
            (Some(id), None) => Ok(Self::user(id)),
            (None, Some(name)) => Self::guest(name),
            (None, None) => Err(DomainError::MissingField("voter_name")),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            VoterIdentity::User { id } => format!("user #{}", id),
            VoterIdentity::Guest { name } => name.clone(),
        }
    }
}

impl std::fmt::Display for VoterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One voter's estimation for one issue within one session (Entity)
///
/// Unique per `(session_id, issue_key, voter)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub session_id: SessionId,
    pub issue_key: IssueKey,
    pub voter: VoterIdentity,
    pub estimation: Estimation,
    /// Last submission time (milliseconds since epoch)
    pub voted_at: u64,
}

impl Vote {
    pub fn new(
        session_id: SessionId,
        issue_key: IssueKey,
        voter: VoterIdentity,
        estimation: Estimation,
    ) -> Self {
        Self {
            session_id,
            issue_key,
            voter,
            estimation,
            voted_at: current_timestamp(),
        }
    }

    /// Whether `other` targets the same unique slot and should overwrite this vote
    pub fn same_slot(&self, other: &Vote) -> bool {
        self.session_id == other.session_id
            && self.issue_key == other.issue_key
            && self.voter == other.voter
    }
}
