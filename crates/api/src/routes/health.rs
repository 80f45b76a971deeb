use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
}

/// Reports which store backs the API and whether it answers.
async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let store = state.store();
    if let Err(err) = store.ping().await {
        return Err(ApiError::Internal(format!("{} store unreachable: {err}", store.backend())));
    }
    Ok(Json(json!({ "status": "ok", "store": store.backend() })))
}

async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
