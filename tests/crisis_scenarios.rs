//! End-to-end crisis handling through the HTTP surface.
//!
//! These follow whole conversations: the country request, the user naming a
//! country, and the resources that must then appear in every crisis reply,
//! including replies that fall back because generation failed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dream_analyst::adapters::ai::{MockAIProvider, MockError};
use dream_analyst::adapters::auth::{JwtConfig, JwtSessionService};
use dream_analyst::adapters::http::{api_router, AppDependencies, AppState, RouterSettings};
use dream_analyst::adapters::memory::{
    InMemoryChatSessionStore, InMemoryDreamRepository, InMemoryUserRepository,
};
use dream_analyst::application::handlers::purpose;
use dream_analyst::domain::foundation::{AuthenticatedUser, UserId};
use dream_analyst::domain::safety::{ResourceResolver, COUNTRY_REQUEST, CRISIS_OPENER};
use dream_analyst::ports::TokenIssuer;

const CANADA: &str = "Crisis Services Canada: 1-833-456-4566";

struct Harness {
    router: Router,
    provider: MockAIProvider,
    token: String,
}

fn harness(provider: MockAIProvider) -> Harness {
    let tokens = Arc::new(JwtSessionService::new(JwtConfig::new(
        "crisis-test-secret",
        "dream-analyst",
    )));
    let token = tokens
        .issue(&AuthenticatedUser::new(
            UserId::new("dreamer@example.com").unwrap(),
            "dreamer@example.com",
        ))
        .unwrap()
        .token;

    let state = AppState::new(AppDependencies {
        provider: Arc::new(provider.clone()),
        resolver: ResourceResolver::default(),
        dreams: Arc::new(InMemoryDreamRepository::new()),
        users: Arc::new(InMemoryUserRepository::new()),
        sessions: Arc::new(InMemoryChatSessionStore::new()),
        token_issuer: tokens.clone(),
        session_validator: tokens,
        chat_temperature: 0.7,
        extraction_temperature: 0.1,
    });

    Harness {
        router: api_router(state, &RouterSettings::default()),
        provider,
        token,
    }
}

impl Harness {
    async fn post(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json");
        let body = body.map(|b| b.to_string()).unwrap_or_default();
        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn therapist_session(&self) -> String {
        let (status, body) = self.post("/api/therapist/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn say(&self, session_id: &str, content: &str) -> Value {
        let (status, body) = self
            .post(
                &format!("/api/sessions/{}/messages", session_id),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
        body
    }
}

fn reply_text(body: &Value) -> &str {
    body["reply"].as_str().unwrap()
}

#[tokio::test]
async fn crisis_dream_gets_fixed_safety_message_without_generation() {
    let h = harness(
        MockAIProvider::new()
            .with_response_for(purpose::MOOD, r#"{"mood": "negative", "emotions": ["despair"]}"#)
            .with_response_for(purpose::KEYWORDS, r#"{"keywords": ["death"]}"#),
    );

    let (status, body) = h
        .post(
            "/api/dreams",
            Some(json!({"dream_text": "I dreamed I wanted to end my life"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["crisis"], true);
    let analysis = body["dream"]["analysis"].as_str().unwrap();
    assert!(analysis.contains("which country are you in"));
    assert!(analysis.contains(ResourceResolver::default().global()));
    assert!(h.provider.calls_for(purpose::INTERPRETATION).is_empty());
    assert_eq!(body["dream"]["mood"], "negative");
}

#[tokio::test]
async fn country_exchange_then_resources_then_fallback() {
    let h = harness(
        MockAIProvider::new()
            .with_response_for(purpose::CHAT, "That sounds incredibly heavy.")
            .with_response_for(purpose::CHAT, "Thank you for telling me.")
            .with_error_for(purpose::CHAT, MockError::Timeout { timeout_secs: 60 }),
    );
    let session = h.therapist_session().await;

    // Crisis without a country yet: the reply must ask for one
    let first = h.say(&session, "I don't want to live anymore").await;
    assert_eq!(first["crisis"], true);
    assert!(reply_text(&first).starts_with("That sounds incredibly heavy."));
    assert!(reply_text(&first).ends_with(COUNTRY_REQUEST));
    let prompt = h.provider.calls_for(purpose::CHAT)[0]
        .system_prompt
        .clone()
        .unwrap_or_default();
    assert!(prompt.contains("MENTAL HEALTH CRISIS PROTOCOL"));

    // Naming the country is not itself a crisis message
    let second = h.say(&session, "I'm in Canada").await;
    assert_eq!(second["crisis"], false);
    assert_eq!(reply_text(&second), "Thank you for telling me.");

    // Generation fails on the next crisis turn; the fallback carries Canada's line
    let third = h.say(&session, "everything feels hopeless").await;
    assert_eq!(third["crisis"], true);
    assert_eq!(third["canned"], true);
    assert_eq!(
        reply_text(&third),
        format!("{} Please reach out to these resources immediately: {}", CRISIS_OPENER, CANADA)
    );
    assert_eq!(third["session"]["messages"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn unknown_country_after_request_is_asked_again() {
    let h = harness(
        MockAIProvider::new()
            .with_response_for(purpose::CHAT, "I'm here with you. Which country are you in?")
            .with_response_for(purpose::CHAT, "I hear you.")
            .with_response_for(purpose::CHAT, "You are not alone."),
    );
    let session = h.therapist_session().await;

    let first = h.say(&session, "I want to kill myself").await;
    // The reply already asks, so nothing is appended
    assert_eq!(reply_text(&first), "I'm here with you. Which country are you in?");

    h.say(&session, "somewhere far away").await;

    let third = h.say(&session, "there's no point anymore").await;
    assert_eq!(third["crisis"], true);
    assert_eq!(
        reply_text(&third),
        format!("You are not alone.\n\n{}", COUNTRY_REQUEST)
    );
}

#[tokio::test]
async fn ordinary_turn_failure_gets_gentle_fallback() {
    let h = harness(
        MockAIProvider::new().with_error_for(purpose::CHAT, MockError::AuthenticationFailed),
    );
    let session = h.therapist_session().await;

    let body = h.say(&session, "I had a strange week").await;
    assert_eq!(body["crisis"], false);
    assert_eq!(body["canned"], true);
    assert!(reply_text(&body).starts_with("I appreciate you sharing that with me."));
}
