//! Dream Analyst API server.
//!
//! Configuration comes from `DREAM_ANALYST__*` environment variables (and a
//! `.env` file in development). Without a `database` section, dreams and
//! accounts live in memory and vanish on restart.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dream_analyst::adapters::ai::{MistralConfig, MistralProvider};
use dream_analyst::adapters::auth::{JwtConfig, JwtSessionService};
use dream_analyst::adapters::http::{api_router, AppDependencies, AppState, RouterSettings};
use dream_analyst::adapters::memory::{
    InMemoryChatSessionStore, InMemoryDreamRepository, InMemoryUserRepository,
};
use dream_analyst::adapters::postgres::{PostgresDreamRepository, PostgresUserRepository};
use dream_analyst::config::{AppConfig, DatabaseConfig};
use dream_analyst::domain::safety::{ResourceResolver, ResourceTable};
use dream_analyst::ports::{DreamRepository, UserRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        %addr,
        "Starting dream analyst"
    );

    let (dreams, users) = match &config.database {
        Some(database) => postgres_stores(database).await?,
        None => {
            tracing::warn!("No database configured, dreams and accounts are kept in memory");
            (
                Arc::new(InMemoryDreamRepository::new()) as Arc<dyn DreamRepository>,
                Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>,
            )
        }
    };

    let table = match &config.safety.resources_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading crisis resources");
            ResourceTable::from_file(path)?
        }
        None => ResourceTable::builtin(),
    };

    let api_key = config
        .ai
        .mistral_api_key
        .as_ref()
        .map(|k| k.expose_secret().clone())
        .unwrap_or_default();
    let provider = MistralProvider::new(
        MistralConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?;

    let tokens = Arc::new(JwtSessionService::new(
        JwtConfig::new(
            config.auth.jwt_secret.expose_secret().clone(),
            config.auth.issuer.clone(),
        )
        .with_ttl_secs(config.auth.token_ttl_secs),
    ));

    let state = AppState::new(AppDependencies {
        provider: Arc::new(provider),
        resolver: ResourceResolver::new(table),
        dreams,
        users,
        sessions: Arc::new(InMemoryChatSessionStore::with_idle_ttl(
            config.server.session_idle_ttl(),
        )),
        token_issuer: tokens.clone(),
        session_validator: tokens,
        chat_temperature: config.ai.chat_temperature,
        extraction_temperature: config.ai.extraction_temperature,
    });
    let app = api_router(state, &RouterSettings::from_server_config(&config.server));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn postgres_stores(
    database: &DatabaseConfig,
) -> Result<(Arc<dyn DreamRepository>, Arc<dyn UserRepository>), BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    Ok((
        Arc::new(PostgresDreamRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
