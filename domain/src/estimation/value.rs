//! Free-text estimation value

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum length of a raw estimation string
pub const MAX_ESTIMATION_LEN: usize = 10;

/// A voter's estimation as submitted (Value Object)
///
/// The raw text is always retained. The numeric projection is computed on
/// demand, so values like `"?"` or `"coffee"` are stored untouched and simply
/// excluded from consensus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Estimation(String);

impl Estimation {
    /// Wrap a raw estimation without validation
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Validate a caller-supplied estimation (non-blank, bounded length)
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::MissingField("estimation"));
        }
        if raw.chars().count() > MAX_ESTIMATION_LEN {
            return Err(DomainError::invalid(
                "estimation",
                format!("longer than {} characters", MAX_ESTIMATION_LEN),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Numeric projection: `Some` only for text parsing to a finite number
    pub fn numeric(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric().is_some()
    }
}

impl std::fmt::Display for Estimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_projection() {
        assert_eq!(Estimation::new("5").numeric(), Some(5.0));
        assert_eq!(Estimation::new(" 2.5 ").numeric(), Some(2.5));
        assert_eq!(Estimation::new("?").numeric(), None);
        assert_eq!(Estimation::new("abc").numeric(), None);
    }

    #[test]
    fn test_non_finite_is_not_numeric() {
        assert!(!Estimation::new("inf").is_numeric());
        assert!(!Estimation::new("NaN").is_numeric());
    }

    #[test]
    fn test_raw_text_is_retained() {
        let estimation = Estimation::parse(" ? ").unwrap();
        assert_eq!(estimation.raw(), "?");
        assert_eq!(estimation.to_string(), "?");
    }

    #[test]
    fn test_parse_rejects_blank_and_long() {
        assert_eq!(
            Estimation::parse("  "),
            Err(DomainError::MissingField("estimation"))
        );
        assert!(Estimation::parse("12345678901").is_err());
        assert!(Estimation::parse("1234567890").is_ok());
    }
}
