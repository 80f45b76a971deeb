use axum::{
    extract::{Path, State},
    routing::{delete, get, patch},
    Json, Router,
};
use portal_cms_core::resources::partner::{self, PartnerRequest, PartnerStats, PartnerStatus};
use portal_cms_core::Document;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::crud::{self, parse_id};
use crate::error::ApiResult;
use crate::extract::Payload;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(crud::list::<PartnerRequest>).post(crud::create::<PartnerRequest>),
        )
        .route("/stats", get(stats))
        .route("/{id}", delete(crud::delete::<PartnerRequest>))
        .route("/{id}/status", patch(set_status))
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<PartnerStats>> {
    Ok(Json(partner::stats(state.store()).await?))
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: PartnerStatus,
}

/// Move a request to pending, approved or rejected.
async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(change): Payload<StatusChange>,
) -> ApiResult<Json<Document<PartnerRequest>>> {
    let id = parse_id::<PartnerRequest>(&id)?;
    let mut patch = Map::new();
    patch.insert(
        "status".to_string(),
        Value::String(change.status.as_str().to_string()),
    );
    let updated = state
        .store()
        .collection::<PartnerRequest>()
        .update(id, patch)
        .await?;
    tracing::info!(id = %updated.id, status = change.status.as_str(), "partner request reviewed");
    Ok(Json(updated))
}
