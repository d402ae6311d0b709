use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::sync::Arc;

use crate::error::StrategyError;
use crate::reference::ReferenceData;
use crate::strategy::compute_strategy;
use crate::types::{StrategyRequest, StrategyResult};

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub reference: Arc<ReferenceData>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/strategy/calculate", get(calculate))
        .with_state(state)
}

// ---------- Handler ----------

async fn calculate(
    State(state): State<AppState>,
    Query(req): Query<StrategyRequest>,
) -> Result<Json<StrategyResult>, (StatusCode, Json<serde_json::Value>)> {
    // fresh generator per request, nothing shared between callers
    let mut rng = StdRng::from_entropy();
    compute_strategy(&state.reference, &req, &mut rng)
        .map(Json)
        .map_err(|e| match e {
            StrategyError::InvalidInput(msg) => {
                tracing::info!("rejected request track={} weather={}: {}", req.track, req.weather, msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
            }
        })
}
