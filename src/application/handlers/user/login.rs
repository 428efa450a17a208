//! LoginHandler - verifies credentials and issues an access token.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp};
use crate::domain::user::Email;
use crate::ports::{IssuedToken, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: AuthenticatedUser,
    pub token: IssuedToken,
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown email and wrong password are indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Infrastructure(String),

    #[error("Login failed: {0}")]
    Token(#[from] AuthError),
}

impl From<DomainError> for LoginError {
    fn from(err: DomainError) -> Self {
        LoginError::Infrastructure(err.message)
    }
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, LoginError> {
        let email = Email::parse(&cmd.email).map_err(|_| LoginError::InvalidCredentials)?;
        let mut account = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        let password = cmd.password;
        let (account, accepted) = tokio::task::spawn_blocking(move || {
            let accepted = account.login(&password);
            (account, accepted)
        })
        .await
        .map_err(|e| LoginError::Infrastructure(e.to_string()))?;

        if !accepted {
            tracing::info!("Rejected login attempt");
            return Err(LoginError::InvalidCredentials);
        }

        let logged_in_at = account.last_login_at().unwrap_or_else(Timestamp::now);
        self.users.record_login(&email, logged_in_at).await?;

        let user = AuthenticatedUser::new(account.id().clone(), email.as_str());
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, token })
    }
}
