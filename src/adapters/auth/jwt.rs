//! HS256 JWT adapter for issuing and validating access tokens.
//!
//! Tokens carry the account email as `sub`, the service issuer as `iss`, and
//! an expiry. Validation checks all three plus the signature.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub issuer: String,
    pub token_ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
            token_ttl_secs: 24 * 60 * 60,
        }
    }

    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    exp: i64,
    iat: i64,
}

/// Signs and validates access tokens with a shared secret.
pub struct JwtSessionService {
    issuer: String,
    ttl_secs: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSessionService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        Self {
            issuer: config.issuer,
            ttl_secs: config.token_ttl_secs,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtSessionService {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let expires_at = now.plus_secs(self.ttl_secs);
        let claims = Claims {
            sub: user.id.as_str().to_string(),
            iss: self.issuer.clone(),
            exp: expires_at.as_unix_secs(),
            iat: now.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))?;

        tracing::debug!(user_id = %user.id, "Issued access token");
        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let user_id = UserId::new(&data.claims.sub).map_err(|_| {
            tracing::warn!("Invalid subject in token");
            AuthError::InvalidToken
        })?;
        let email = data.claims.sub;

        Ok(AuthenticatedUser::new(user_id, email))
    }
}

impl std::fmt::Debug for JwtSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
