//! Validation errors for configuration and guestbook input
//!
//! Two values get validated in this crate: the target database name,
//! before it is ever spliced into DDL, and the visitor name a guest
//! submits, before it is inserted. Both report through this one type so
//! the HTTP layer has a single bad-request mapping.

use std::fmt;

/// Validation error for domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value was empty (or blank, for visitor names)
    Empty { field: &'static str },

    /// Value is longer than the backing column or identifier allows
    TooLong { field: &'static str, max: usize },

    /// Value failed an allow-list check
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} must not be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} is too long (limit {} characters)", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
