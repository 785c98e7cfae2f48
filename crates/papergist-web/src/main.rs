use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod state;
mod template;
mod upload;

use papergist_core::config_file::{self, ConfigFile};
use papergist_core::{Config, DecodeParams, ModelSettings, ProviderKind, SummaryMode};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let file = config_file::load_config();
    let settings = resolve_model_settings(&file)?;
    let config = resolve_pipeline_config(&file)?;
    config.validate()?;

    // The model handle is process-wide state: built once here, shared by
    // every request through AppState.
    let backend = papergist_core::build_backend(&settings);
    tracing::info!(
        backend = backend.name(),
        model = %settings.model_id,
        mode = config.mode.label(),
        "model backend initialized"
    );

    let client = reqwest::Client::new();
    let state = Arc::new(AppState {
        backend,
        client,
        config,
    });

    let body_limit_mb = file
        .server
        .as_ref()
        .and_then(|s| s.body_limit_mb)
        .unwrap_or(50);
    let body_limit = axum::extract::DefaultBodyLimit::max(body_limit_mb * 1024 * 1024);

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route(
            "/summarize",
            axum::routing::post(handlers::summarize::summarize),
        )
        .route("/health", axum::routing::get(handlers::index::health))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .or_else(|| file.server.as_ref().and_then(|s| s.port))
        .unwrap_or(5000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve model settings: env vars > config file > defaults.
fn resolve_model_settings(file: &ConfigFile) -> anyhow::Result<ModelSettings> {
    let model = file.model.clone().unwrap_or_default();

    let provider = match std::env::var("PAPERGIST_PROVIDER")
        .ok()
        .or(model.provider)
    {
        Some(name) => ProviderKind::parse(&name)?,
        None => ProviderKind::HuggingFace,
    };

    let defaults = ModelSettings::default();
    Ok(ModelSettings {
        provider,
        model_id: std::env::var("PAPERGIST_MODEL")
            .ok()
            .or(model.model_id)
            .unwrap_or(defaults.model_id),
        endpoint: std::env::var("PAPERGIST_ENDPOINT").ok().or(model.endpoint),
        api_key: std::env::var("PAPERGIST_API_KEY").ok().or(model.api_key),
    })
}

/// Resolve the pipeline configuration from the config file.
fn resolve_pipeline_config(file: &ConfigFile) -> anyhow::Result<Config> {
    let summary = file.summary.clone().unwrap_or_default();
    let defaults = Config::default();

    let mode = match summary.mode {
        Some(name) => SummaryMode::parse(&name)?,
        None => defaults.mode,
    };

    Ok(Config {
        mode,
        max_chunk_size: summary.max_chunk_size.unwrap_or(defaults.max_chunk_size),
        decode: DecodeParams {
            max_length: summary.max_length.unwrap_or(defaults.decode.max_length),
            min_length: summary.min_length.unwrap_or(defaults.decode.min_length),
        },
        model_timeout_secs: summary.timeout_secs.unwrap_or(defaults.model_timeout_secs),
        sections: defaults.sections,
    })
}
