//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
///
/// Every variant names the offending input field so callers can report
/// exactly what was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DomainError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the input field that was rejected
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::MissingField(field) => field,
            DomainError::InvalidField { field, .. } => field,
        }
    }
}

/// Require a non-blank value for `field`, returning it trimmed.
pub fn require_field<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = DomainError::MissingField("session_id");
        assert_eq!(error.to_string(), "Missing required field: session_id");
        assert_eq!(error.field(), "session_id");
    }

    #[test]
    fn test_invalid_field_display() {
        let error = DomainError::invalid("issue_key", "must not contain whitespace");
        assert_eq!(
            error.to_string(),
            "Invalid issue_key: must not contain whitespace"
        );
        assert_eq!(error.field(), "issue_key");
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("name", Some("  alice ")), Ok("alice"));
        assert_eq!(
            require_field("name", Some("   ")),
            Err(DomainError::MissingField("name"))
        );
        assert_eq!(
            require_field("name", None),
            Err(DomainError::MissingField("name"))
        );
    }
}
