//! RegisterUserHandler - creates an account.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{
    check_password_policy, Email, PasswordHash, PasswordHashError, PasswordPolicyError,
    UserAccount,
};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    WeakPassword(#[from] PasswordPolicyError),

    #[error("Email already registered")]
    AlreadyRegistered,

    #[error("Registration failed: {0}")]
    Infrastructure(String),
}

impl From<PasswordHashError> for RegisterError {
    fn from(err: PasswordHashError) -> Self {
        RegisterError::Infrastructure(err.to_string())
    }
}

impl From<DomainError> for RegisterError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadyExists => RegisterError::AlreadyRegistered,
            _ => RegisterError::Infrastructure(err.message),
        }
    }
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<UserAccount, RegisterError> {
        let email = Email::parse(&cmd.email).map_err(|_| RegisterError::InvalidEmail)?;
        if cmd.password != cmd.confirm_password {
            return Err(RegisterError::PasswordMismatch);
        }
        check_password_policy(&cmd.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::AlreadyRegistered);
        }

        let password = cmd.password;
        let hash = tokio::task::spawn_blocking(move || PasswordHash::create(&password))
            .await
            .map_err(|e| RegisterError::Infrastructure(e.to_string()))??;

        let account = UserAccount::register(email, hash);
        self.users.insert(&account).await?;

        tracing::info!(user_id = %account.id(), "User registered");
        Ok(account)
    }
}
