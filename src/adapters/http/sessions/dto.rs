//! HTTP DTOs for chat session endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{OrchestratedReply, ReplySource};
use crate::domain::conversation::{Persona, Role, Utterance};
use crate::domain::session::ChatSession;

// ────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtteranceResponse {
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

impl From<&Utterance> for UtteranceResponse {
    fn from(u: &Utterance) -> Self {
        Self {
            role: u.role(),
            content: u.content().to_string(),
            created_at: u.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Full session view, transcript included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub persona: Persona,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dream_text: Option<String>,
    pub messages: Vec<UtteranceResponse>,
    pub created_at: String,
}

impl From<&ChatSession> for SessionResponse {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id().to_string(),
            persona: session.persona(),
            owner: session.owner().map(|o| o.to_string()),
            dream_text: session.dream_text().map(str::to_owned),
            messages: session
                .conversation()
                .utterances()
                .iter()
                .map(UtteranceResponse::from)
                .collect(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub reply: String,
    pub crisis: bool,
    /// True when the reply is a fixed or fallback text rather than generated.
    pub canned: bool,
    pub session: SessionResponse,
}

impl SendMessageResponse {
    pub fn new(reply: OrchestratedReply, session: &ChatSession) -> Self {
        Self {
            canned: reply.source != ReplySource::Generated,
            reply: reply.text,
            crisis: reply.crisis,
            session: session.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn therapist_session_serializes_with_welcome() {
        let session = ChatSession::start_therapist(None).unwrap();
        let json = serde_json::to_value(SessionResponse::from(&session)).unwrap();

        assert_eq!(json["persona"], "therapist");
        assert!(json.get("owner").is_none());
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "therapist");
    }

    #[test]
    fn send_message_request_deserializes() {
        let req: SendMessageRequest = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(req.content, "hi");
    }
}
