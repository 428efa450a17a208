//! UserAccount aggregate.

use super::{Email, PasswordHash};
use crate::domain::foundation::{Timestamp, UserId};

/// A registered account. Identified by its email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    created_at: Timestamp,
    last_login_at: Option<Timestamp>,
}

impl UserAccount {
    /// Registers a new account.
    pub fn register(email: Email, password_hash: PasswordHash) -> Self {
        Self {
            id: user_id_for(&email),
            email,
            password_hash,
            created_at: Timestamp::now(),
            last_login_at: None,
        }
    }

    /// Rebuilds an account from storage.
    pub fn reconstitute(
        email: Email,
        password_hash: PasswordHash,
        created_at: Timestamp,
        last_login_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id: user_id_for(&email),
            email,
            password_hash,
            created_at,
            last_login_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<Timestamp> {
        self.last_login_at
    }

    /// Checks the password and stamps the login time on success.
    pub fn login(&mut self, password: &str) -> bool {
        if !self.password_hash.verify(password) {
            return false;
        }
        self.last_login_at = Some(Timestamp::now());
        true
    }
}

fn user_id_for(email: &Email) -> UserId {
    UserId::from_validated(email.as_str())
}
