//! Email address value object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A syntactically valid email address, stored trimmed.
///
/// Accepted shape: `local@domain.tld` with a final label of two or more letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let candidate = raw.trim();
        if candidate.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !is_valid_email(candidate) {
            return Err(ValidationError::invalid_format("email", "Please enter a valid email address"));
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for ok in ["a@b.io", "first.last+tag@mail.example.co.uk", "x_y%z-1@sub-domain.org"] {
            assert!(Email::parse(ok).is_ok(), "{} should be valid", ok);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["plain", "@b.io", "a@", "a@b", "a@b.c", "a@@b.io", "a b@c.io", "a@b.i0", "a@.io"] {
            assert!(Email::parse(bad).is_err(), "{} should be invalid", bad);
        }
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(Email::parse("  a@b.io ").unwrap().as_str(), "a@b.io");
    }

    #[test]
    fn empty_is_empty_field_error() {
        assert_eq!(Email::parse("").unwrap_err(), ValidationError::empty_field("email"));
    }
}
