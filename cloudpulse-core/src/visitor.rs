//! Visitor name validation
//!
//! Presence and length checks only — the guestbook intentionally records
//! repeated identical names as distinct entries, since visit frequency is
//! the leaderboard signal.

use crate::validation::ValidationError;

/// Maximum visitor name length, matching the VARCHAR(100) column
const MAX_VISITOR_NAME_LEN: usize = 100;

/// Validated guestbook visitor name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorName(String);

impl VisitorName {
    /// Create a visitor name. Surrounding whitespace is trimmed; the result
    /// must be non-empty and at most 100 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "visitor name",
            });
        }

        // The backing column is VARCHAR(100), which MySQL counts in
        // characters, so the limit is measured in characters here too.
        if trimmed.chars().count() > MAX_VISITOR_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "visitor name",
                max: MAX_VISITOR_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VisitorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = VisitorName::new("  Alice  ").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(VisitorName::new("").is_err());
        assert!(VisitorName::new("   ").is_err());
    }

    #[test]
    fn rejects_over_length() {
        let long = "x".repeat(101);
        assert!(VisitorName::new(&long).is_err());
        let max = "x".repeat(100);
        assert!(VisitorName::new(&max).is_ok());
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        // 100 Devanagari characters is 300 bytes but still fits VARCHAR(100).
        let max_multibyte = "न".repeat(100);
        assert!(VisitorName::new(&max_multibyte).is_ok());
        let over = "न".repeat(101);
        assert!(VisitorName::new(&over).is_err());
    }

    #[test]
    fn allows_repeated_names() {
        // Frequency is the leaderboard signal; no dedup at this layer.
        assert_eq!(
            VisitorName::new("Bob").unwrap(),
            VisitorName::new("Bob").unwrap()
        );
    }
}
