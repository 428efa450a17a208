//! Wiring from ports to the per-feature handler states.

use std::sync::Arc;

use crate::application::handlers::{
    ClearSessionHandler, DreamJournalHandler, DreamStatisticsHandler, FreeAnalysisHandler,
    GetSessionHandler, LoginHandler, RegisterUserHandler, ResponseOrchestrator,
    SendMessageHandler, SessionLocks, SignalExtractor, StartTherapistSessionHandler,
    SubmitDreamHandler,
};
use crate::domain::safety::ResourceResolver;
use crate::ports::{
    AIProvider, ChatSessionStore, DreamRepository, SessionValidator, TokenIssuer, UserRepository,
};

use super::analysis::AnalysisHandlers;
use super::auth::AuthHandlers;
use super::dreams::DreamHandlers;
use super::sessions::SessionHandlers;

/// Everything the HTTP surface needs from the outside world.
pub struct AppDependencies {
    pub provider: Arc<dyn AIProvider>,
    pub resolver: ResourceResolver,
    pub dreams: Arc<dyn DreamRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn ChatSessionStore>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub chat_temperature: f32,
    pub extraction_temperature: f32,
}

/// Handler states for every feature router.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthHandlers,
    pub analysis: AnalysisHandlers,
    pub dreams: DreamHandlers,
    pub sessions: SessionHandlers,
    pub validator: Arc<dyn SessionValidator>,
}

impl AppState {
    pub fn new(deps: AppDependencies) -> Self {
        let orchestrator = ResponseOrchestrator::new(deps.provider.clone(), deps.resolver)
            .with_temperature(deps.chat_temperature);
        let extractor =
            SignalExtractor::new(deps.provider).with_temperature(deps.extraction_temperature);
        let locks = SessionLocks::new();

        let auth = AuthHandlers::new(
            Arc::new(RegisterUserHandler::new(deps.users.clone())),
            Arc::new(LoginHandler::new(deps.users, deps.token_issuer)),
        );

        let analysis = AnalysisHandlers::new(Arc::new(FreeAnalysisHandler::new(
            orchestrator.clone(),
            extractor.clone(),
            deps.sessions.clone(),
        )));

        let dreams = DreamHandlers::new(
            Arc::new(SubmitDreamHandler::new(
                orchestrator.clone(),
                extractor,
                deps.dreams.clone(),
                deps.sessions.clone(),
            )),
            Arc::new(DreamJournalHandler::new(deps.dreams.clone())),
            Arc::new(DreamStatisticsHandler::new(deps.dreams)),
        );

        let sessions = SessionHandlers::new(
            Arc::new(StartTherapistSessionHandler::new(deps.sessions.clone())),
            Arc::new(GetSessionHandler::new(deps.sessions.clone())),
            Arc::new(ClearSessionHandler::new(deps.sessions.clone(), locks.clone())),
            Arc::new(SendMessageHandler::new(orchestrator, deps.sessions, locks)),
        );

        Self {
            auth,
            analysis,
            dreams,
            sessions,
            validator: deps.session_validator,
        }
    }
}
