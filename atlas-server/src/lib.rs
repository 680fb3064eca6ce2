//! # atlas-server
//!
//! HTTP surface for the Atlas product-intelligence pipeline:
//!
//! - `POST /run-agents` - run the three-stage pipeline over a product text
//! - `GET /health` - liveness, independent of database connectivity
//! - `GET /history` - most recent persisted analyses

mod context;

pub use context::AppContext;

use atlas_core::PipelineResult;
use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, header},
    routing::{get, post},
};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct RunAgentsRequest {
    #[serde(rename = "productText")]
    pub product_text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn internal_error(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
}

/// Build the application router. The original deployment served a browser
/// frontend from another origin, so CORS stays permissive.
pub fn create_app(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::any());

    Router::new()
        .route("/run-agents", post(run_agents))
        .route("/health", get(health))
        .route("/history", get(history))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn run_agents(
    State(ctx): State<AppContext>,
    Json(req): Json<RunAgentsRequest>,
) -> Result<Json<PipelineResult>, ApiError> {
    let result = ctx
        .orchestrator
        .run_pipeline(&req.product_text)
        .await
        .map_err(|e| {
            error!(error = %e, "pipeline failed");
            internal_error(e.to_string())
        })?;

    // Best-effort: the sink suppresses its own failures.
    ctx.store.record(&req.product_text, &result).await;

    Ok(Json(result))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn history(State(ctx): State<AppContext>) -> Result<Json<Vec<Document>>, ApiError> {
    let analyses = ctx
        .store
        .recent_analyses(HISTORY_LIMIT)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(Json(analyses))
}
