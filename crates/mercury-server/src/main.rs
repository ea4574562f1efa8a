use anyhow::{Context, Result};
use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

#[cfg(test)]
mod test_support;

use adapters::GroqProvider;
use application::TriageService;
use config::ServerConfig;
use mercury::CompletionProvider;

/// Triage service over whichever completion provider is configured
pub type AppTriageService = TriageService<dyn CompletionProvider>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub triage: Arc<AppTriageService>,
}

/// CORS policy for the configured origins, credentials allowed
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", o))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the router with docs, routes and middleware
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::health::router())
        .merge(routes::analyze::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mercury_server=info,mercury=info,tower_http=info")),
        )
        .init();

    tracing::info!("📨 Mercury API initializing...");

    let config = ServerConfig::from_env().context("Refusing to start without valid configuration")?;

    let provider = GroqProvider::new(config.api_key.clone())
        .with_model(config.model.clone())
        .with_base_url(config.base_url.clone())
        .with_timeout(config.model_timeout);
    tracing::info!(
        "🤖 Completion provider: groq ({}), timeout {:?}",
        config.model,
        config.model_timeout
    );

    let provider: Arc<dyn CompletionProvider> = Arc::new(provider);
    let triage = Arc::new(
        TriageService::new(provider).with_retry_on_invalid_output(config.retry_invalid_output),
    );

    if config.retry_invalid_output {
        tracing::info!("🔁 One retry on malformed or schema-violating output enabled");
    }

    let cors = cors_layer(&config.cors_origins)?;
    tracing::info!("🌐 CORS origins: {}", config.cors_origins.join(", "));

    let router = build_router(AppState { triage }, cors);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Mercury API ready on {}", addr);

    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}
