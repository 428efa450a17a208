//! FreeAnalysisHandler - interpretation for guests, nothing persisted.

use std::sync::Arc;

use super::orchestrator::{purpose, ResponseOrchestrator};
use super::signals::{mood_metadata, SignalExtractor};
use super::submit_dream::SubmitDreamError;
use crate::domain::session::ChatSession;
use crate::domain::signals::MoodSignal;
use crate::ports::{ChatSessionStore, RequestMetadata};

#[derive(Debug, Clone)]
pub struct FreeAnalysisCommand {
    pub dream_text: String,
}

#[derive(Debug, Clone)]
pub struct FreeAnalysisResult {
    pub analysis: String,
    pub mood: MoodSignal,
    /// Guest analyst session for follow-up questions.
    pub session: ChatSession,
    pub crisis: bool,
}

/// Handler for guest dream analysis.
pub struct FreeAnalysisHandler {
    orchestrator: ResponseOrchestrator,
    extractor: SignalExtractor,
    sessions: Arc<dyn ChatSessionStore>,
}

impl FreeAnalysisHandler {
    pub fn new(
        orchestrator: ResponseOrchestrator,
        extractor: SignalExtractor,
        sessions: Arc<dyn ChatSessionStore>,
    ) -> Self {
        Self {
            orchestrator,
            extractor,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: FreeAnalysisCommand) -> Result<FreeAnalysisResult, SubmitDreamError> {
        if cmd.dream_text.trim().is_empty() {
            return Err(SubmitDreamError::Validation("Dream text cannot be empty".to_string()));
        }

        let (reply, mood) = futures::join!(
            self.orchestrator.first_submission(
                &cmd.dream_text,
                &[],
                RequestMetadata::new(purpose::INTERPRETATION),
            ),
            self.extractor.extract_mood(&cmd.dream_text, mood_metadata()),
        );

        let session = ChatSession::start_analyst(None, cmd.dream_text, reply.text.clone())?;
        self.sessions.put(&session).await?;

        Ok(FreeAnalysisResult {
            analysis: reply.text,
            mood: mood.into_value(),
            session,
            crisis: reply.crisis,
        })
    }
}
