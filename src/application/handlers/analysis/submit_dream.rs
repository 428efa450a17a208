//! SubmitDreamHandler - interpret, tag and save a signed-in user's dream.

use std::sync::Arc;

use thiserror::Error;

use super::orchestrator::{purpose, OrchestratedReply, ResponseOrchestrator};
use super::signals::{keyword_metadata, mood_metadata, SignalExtractor};
use crate::domain::dream::{transcript_text, DreamRecord};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::session::ChatSession;
use crate::ports::{ChatSessionStore, DreamRepository, RequestMetadata};

/// Dreams loaded for context; at most `CONTEXT_DREAMS` reach the prompt.
const RECENT_DREAMS: usize = 5;
const CONTEXT_DREAMS: usize = 3;

/// Command to submit a dream.
#[derive(Debug, Clone)]
pub struct SubmitDreamCommand {
    pub owner: UserId,
    pub dream_text: String,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitDreamResult {
    pub dream: DreamRecord,
    /// Analyst session for follow-up questions.
    pub session: ChatSession,
    pub crisis: bool,
}

#[derive(Debug, Error)]
pub enum SubmitDreamError {
    #[error("{0}")]
    Validation(String),

    /// The dream could not be stored. Nothing was saved.
    #[error("Dream store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    Domain(DomainError),
}

impl From<DomainError> for SubmitDreamError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SubmitDreamError::Validation(err.message),
            _ if err.is_infrastructure() => SubmitDreamError::StorageUnavailable(err.message),
            _ => SubmitDreamError::Domain(err),
        }
    }
}

/// Handler for dream submission.
pub struct SubmitDreamHandler {
    orchestrator: ResponseOrchestrator,
    extractor: SignalExtractor,
    dreams: Arc<dyn DreamRepository>,
    sessions: Arc<dyn ChatSessionStore>,
}

impl SubmitDreamHandler {
    pub fn new(
        orchestrator: ResponseOrchestrator,
        extractor: SignalExtractor,
        dreams: Arc<dyn DreamRepository>,
        sessions: Arc<dyn ChatSessionStore>,
    ) -> Self {
        Self {
            orchestrator,
            extractor,
            dreams,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: SubmitDreamCommand) -> Result<SubmitDreamResult, SubmitDreamError> {
        if cmd.dream_text.trim().is_empty() {
            return Err(SubmitDreamError::Validation("Dream text cannot be empty".to_string()));
        }

        // 1. Previous dreams for context
        let previous = self.dreams.recent(&cmd.owner, RECENT_DREAMS).await?;
        let context_lines: Vec<String> = previous
            .iter()
            .take(CONTEXT_DREAMS)
            .map(DreamRecord::context_line)
            .collect();

        // 2. Interpretation and mood are independent
        let owner = Some(cmd.owner.clone());
        let (reply, mood) = futures::join!(
            self.orchestrator.first_submission(
                &cmd.dream_text,
                &context_lines,
                RequestMetadata::new(purpose::INTERPRETATION).for_user(owner.clone()),
            ),
            self.extractor
                .extract_mood(&cmd.dream_text, mood_metadata().for_user(owner.clone())),
        );
        let OrchestratedReply { text: analysis, crisis, .. } = reply;
        let mood = mood.into_value();

        // 3. Keywords come from the full transcript
        let transcript = transcript_text(&cmd.dream_text, &analysis);
        let keywords = self
            .extractor
            .extract_keywords(&transcript, keyword_metadata().for_user(owner))
            .await
            .into_value();

        // 4. Persist
        let dream = DreamRecord::new(
            cmd.owner.clone(),
            cmd.dream_text.clone(),
            analysis.clone(),
            keywords,
            mood.mood,
            mood.emotions,
        )?;
        self.dreams.save(&dream).await.map_err(|e| {
            tracing::error!(error = %e, owner = %cmd.owner, "Failed to save dream");
            SubmitDreamError::StorageUnavailable(e.message)
        })?;

        // 5. Follow-up session
        let session = ChatSession::start_analyst(Some(cmd.owner), cmd.dream_text, analysis)?;
        self.sessions.put(&session).await?;

        tracing::info!(dream_id = %dream.id(), session_id = %session.id(), crisis, "Dream submitted");
        Ok(SubmitDreamResult {
            dream,
            session,
            crisis,
        })
    }
}
