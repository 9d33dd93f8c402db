//! Database identifier validation
//!
//! The target schema name is the only externally sourced value that gets
//! interpolated into DDL (`CREATE DATABASE IF NOT EXISTS ...`) — bind
//! parameters can't stand in for identifiers, so the name is restricted to
//! an allow-list before it ever reaches a statement.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::ValidationError;

/// Maximum identifier length MySQL accepts for schema names
const MAX_DATABASE_NAME_LEN: usize = 64;

/// Unquoted-identifier allow-list: ASCII alphanumeric and underscore
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,64}$").expect("invalid identifier regex"));

/// Validated database (schema) name, safe to splice into DDL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Create a database name, validating against the identifier allow-list.
    ///
    /// # Rules
    /// - 1..=64 characters
    /// - ASCII letters, digits, underscores only
    ///
    /// # Example
    /// ```
    /// use cloudpulse_core::DatabaseName;
    ///
    /// assert!(DatabaseName::new("cloudpulse").is_ok());
    /// assert!(DatabaseName::new("drop table; --").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "database name",
            });
        }

        if s.len() > MAX_DATABASE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "database name",
                max: MAX_DATABASE_NAME_LEN,
            });
        }

        if !IDENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "database name",
                reason: "must contain only ASCII letters, digits, and underscores",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
