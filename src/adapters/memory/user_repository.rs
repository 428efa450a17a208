//! In-memory UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::{Email, UserAccount};
use crate::ports::UserRepository;

/// In-memory account storage keyed by email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let key = account.email().as_str().to_string();
        if accounts.contains_key(&key) {
            return Err(DomainError::new(ErrorCode::AlreadyExists, "Email already registered"));
        }
        accounts.insert(key, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.accounts.read().await.get(email.as_str()).cloned())
    }

    async fn record_login(&self, email: &Email, at: Timestamp) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email.as_str())
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;
        *account = UserAccount::reconstitute(
            account.email().clone(),
            account.password_hash().clone(),
            account.created_at(),
            Some(at),
        );
        Ok(())
    }
}
