use anyhow::Context;
use atlas_agent::Orchestrator;
use atlas_model::{DEFAULT_MODEL, GeminiModel};
use atlas_server::{AppContext, create_app};
use atlas_store::{AnalysisStore, StoreConfig};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
    let model_name = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    info!(model = %model_name, "configuring Gemini model");

    let model = Arc::new(GeminiModel::new(api_key, model_name));
    let orchestrator = Arc::new(Orchestrator::from_model(model));

    let store = AnalysisStore::connect(&StoreConfig::from_env()).await;
    if let Err(e) = store.migrate().await {
        warn!(error = %e, "migration failed, persistence may be degraded");
    }

    let ctx = AppContext::new(orchestrator, Arc::new(store));
    let app = create_app(ctx);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!(port, "atlas-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
