//! HTTP handlers for the import endpoint.

use super::state::AppState;
use crate::domain::default_import_records;
use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

/// Body returned whenever the remote lookup fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/import[?code=]
///
/// Without `code`: the default schedule. With `code` (even empty): the lookup's JSON,
/// or `{"error": "Error fetching data"}` on any failure.
pub async fn import(State(state): State<AppState>, Query(query): Query<ImportQuery>) -> Json<Value> {
    let Some(code) = query.code else {
        return Json(json!(default_import_records()));
    };
    match state.lookup.lookup(&code).await {
        Ok(body) => {
            info!(code = %code, "forwarding course lookup response");
            Json(body)
        }
        Err(e) => {
            warn!(code = %code, error = %e, "course lookup failed");
            Json(json!({ "error": FETCH_ERROR_MESSAGE }))
        }
    }
}
