//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::LoginResult;
use crate::domain::user::UserAccount;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login payload. The password is never logged.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub email: String,
    pub created_at: String,
}

impl From<&UserAccount> for AccountResponse {
    fn from(account: &UserAccount) -> Self {
        Self {
            email: account.email().as_str().to_string(),
            created_at: account.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: String,
    pub email: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.token.token,
            token_type: "Bearer".to_string(),
            expires_at: result.token.expires_at.as_datetime().to_rfc3339(),
            email: result.user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_debug_hides_password() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.io", "password": "Lucid#Dream1"}"#).unwrap();
        let debug = format!("{:?}", req);
        assert!(debug.contains("a@b.io"));
        assert!(!debug.contains("Lucid#Dream1"));
    }
}
