//! Identifier value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of an issue key accepted from callers
const MAX_ISSUE_KEY_LEN: usize = 50;

/// Identifier of a voting session (Value Object)
///
/// Generated as a UUID v4 string when a session is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::MissingField("session_id"));
        }
        uuid::Uuid::parse_str(s)
            .map(|id| Self(id.to_string()))
            .map_err(|_| DomainError::invalid("session_id", "expected a UUID"))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of an issue in the external tracker, e.g. `PROJ-123` (Value Object)
///
/// The key is embedded in tracker URLs, so whitespace and path separators
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IssueKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::MissingField("issue_key"));
        }
        if s.len() > MAX_ISSUE_KEY_LEN {
            return Err(DomainError::invalid(
                "issue_key",
                format!("longer than {} characters", MAX_ISSUE_KEY_LEN),
            ));
        }
        if s.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
            return Err(DomainError::invalid(
                "issue_key",
                "must not contain whitespace, '/', '?' or '#'",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl std::fmt::Display for IssueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_session_id_parses_back() {
        let id = SessionId::generate();
        let parsed: SessionId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_session_id_rejects_garbage() {
        assert_eq!(
            "".parse::<SessionId>(),
            Err(DomainError::MissingField("session_id"))
        );
        assert!(matches!(
            "not-a-uuid".parse::<SessionId>(),
            Err(DomainError::InvalidField { field: "session_id", .. })
        ));
    }

    #[test]
    fn test_issue_key_parsing() {
        let key: IssueKey = " PROJ-42 ".parse().unwrap();
        assert_eq!(key.as_str(), "PROJ-42");

        assert!("PROJ 42".parse::<IssueKey>().is_err());
        assert!("../admin".parse::<IssueKey>().is_err());
        assert_eq!(
            "  ".parse::<IssueKey>(),
            Err(DomainError::MissingField("issue_key"))
        );
        assert!("X".repeat(51).parse::<IssueKey>().is_err());
    }
}
