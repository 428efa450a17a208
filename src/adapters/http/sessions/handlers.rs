//! HTTP handlers for chat session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::{
    ClearSessionHandler, GetSessionHandler, SendMessageCommand, SendMessageHandler,
    StartTherapistSessionHandler,
};
use crate::domain::foundation::SessionId;

use super::dto::{SendMessageRequest, SendMessageResponse, SessionResponse};

// ────────────────────────────────────────────────────────────────────────────
// Handler state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SessionHandlers {
    start_handler: Arc<StartTherapistSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    clear_handler: Arc<ClearSessionHandler>,
    send_handler: Arc<SendMessageHandler>,
}

impl SessionHandlers {
    pub fn new(
        start_handler: Arc<StartTherapistSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        clear_handler: Arc<ClearSessionHandler>,
        send_handler: Arc<SendMessageHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            clear_handler,
            send_handler,
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::bad_request("Invalid session ID"))
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/therapist/sessions
pub async fn start_therapist_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let session = handlers.start_handler.handle(user.id).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let requester = user.map(|u| u.id);
    let session = handlers.get_handler.handle(id, requester.as_ref()).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /api/sessions/:id - restarts the transcript from its opening turn
pub async fn clear_session(
    State(handlers): State<SessionHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let requester = user.map(|u| u.id);
    let session = handlers.clear_handler.handle(id, requester.as_ref()).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// POST /api/sessions/:id/messages
pub async fn send_message(
    State(handlers): State<SessionHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let cmd = SendMessageCommand {
        session_id: parse_session_id(&session_id)?,
        requester: user.map(|u| u.id),
        content: req.content,
    };

    let result = handlers.send_handler.handle(cmd).await?;
    Ok(Json(SendMessageResponse::new(result.reply, &result.session)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_session_id_is_400() {
        let err = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn uuid_session_id_parses() {
        let id = SessionId::new();
        assert_eq!(parse_session_id(&id.to_string()).unwrap(), id);
    }
}
