//! Password policy and bcrypt password hashes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_LENGTH: usize = 8;

#[cfg(not(test))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const HASH_COST: u32 = 4;
const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// First rule a candidate password breaks.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one number")]
    MissingDigit,
    #[error("Password must contain at least one special character")]
    MissingSpecial,
}

/// Checks rules in order and reports the first that fails.
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PasswordPolicyError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(PasswordPolicyError::MissingSpecial);
    }
    Ok(())
}

/// Error raised when a password cannot be hashed.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(#[from] bcrypt::BcryptError);

/// bcrypt hash in its modular crypt encoding (`$2b$<cost>$<salt+digest>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes `password` under a fresh random salt.
    ///
    /// CPU-bound; call from a blocking task inside async code.
    pub fn create(password: &str) -> Result<Self, PasswordHashError> {
        Self::create_with_cost(password, HASH_COST)
    }

    pub fn create_with_cost(password: &str, cost: u32) -> Result<Self, PasswordHashError> {
        Ok(Self(bcrypt::hash(password, cost)?))
    }

    /// Wraps an encoded hash loaded from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks a candidate password. A malformed stored hash never verifies.
    pub fn verify(&self, password: &str) -> bool {
        match bcrypt::verify(password, &self.0) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_reports_first_failing_rule() {
        assert_eq!(check_password_policy("Ab1!"), Err(PasswordPolicyError::TooShort));
        assert_eq!(check_password_policy("abcdefg1!"), Err(PasswordPolicyError::MissingUppercase));
        assert_eq!(check_password_policy("ABCDEFG1!"), Err(PasswordPolicyError::MissingLowercase));
        assert_eq!(check_password_policy("Abcdefgh!"), Err(PasswordPolicyError::MissingDigit));
        assert_eq!(check_password_policy("Abcdefg12"), Err(PasswordPolicyError::MissingSpecial));
        assert_eq!(check_password_policy("Abcdefg1!"), Ok(()));
    }

    #[test]
    fn policy_messages_are_user_facing() {
        assert_eq!(
            PasswordPolicyError::MissingDigit.to_string(),
            "Password must contain at least one number"
        );
    }

    #[test]
    fn hash_verifies_only_original_password() {
        let hash = PasswordHash::create("Dreamer#2024").unwrap();
        assert!(hash.verify("Dreamer#2024"));
        assert!(!hash.verify("dreamer#2024"));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = PasswordHash::create("Dreamer#2024").unwrap();
        let b = PasswordHash::create("Dreamer#2024").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn encoded_form_round_trips_through_storage() {
        let hash = PasswordHash::create("Dreamer#2024").unwrap();
        let loaded = PasswordHash::from_encoded(hash.as_str());
        assert!(loaded.verify("Dreamer#2024"));
    }

    #[test]
    fn hash_uses_bcrypt_encoding_with_requested_cost() {
        let hash = PasswordHash::create_with_cost("Dreamer#2024", 5).unwrap();
        assert!(hash.as_str().starts_with("$2"));
        assert!(hash.as_str().contains("$05$"));
        assert!(!hash.as_str().contains("Dreamer"));
    }

    #[test]
    fn garbage_encoding_never_verifies() {
        assert!(!PasswordHash::from_encoded("no-separator").verify("anything"));
    }
}
