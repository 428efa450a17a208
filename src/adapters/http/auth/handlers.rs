//! HTTP handlers for registration and login.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{
    LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler,
};

use super::dto::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest};

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterUserHandler>,
    login_handler: Arc<LoginHandler>,
}

impl AuthHandlers {
    pub fn new(register_handler: Arc<RegisterUserHandler>, login_handler: Arc<LoginHandler>) -> Self {
        Self {
            register_handler,
            login_handler,
        }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterUserCommand {
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };
    let account = handlers.register_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// POST /api/auth/login
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let cmd = LoginCommand {
        email: req.email,
        password: req.password,
    };
    let result = handlers.login_handler.handle(cmd).await?;
    Ok(Json(result.into()))
}
