use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use portal_cms_core::resources::sales::{self, ExpertWithOffice, SalesExpert};
use portal_cms_core::Page;
use serde_json::{Map, Value};

use super::crud::{self, parse_id, ListParams};
use crate::error::ApiResult;
use crate::extract::{Params, Payload};
use crate::state::AppState;

/// Regional sales contacts, returned with their office location resolved.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(crud::delete::<SalesExpert>))
}

async fn list(
    State(state): State<AppState>,
    Params(params): Params<ListParams>,
) -> ApiResult<Json<Page<ExpertWithOffice>>> {
    let page = params.request::<SalesExpert>()?;
    Ok(Json(sales::list_experts(state.store(), page).await?))
}

async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<Value>,
) -> ApiResult<(StatusCode, Json<ExpertWithOffice>)> {
    let created = state
        .store()
        .collection::<SalesExpert>()
        .create_from(payload)
        .await?;
    let joined = sales::with_office(state.store(), created).await?;
    Ok((StatusCode::CREATED, Json(joined)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(patch): Payload<Map<String, Value>>,
) -> ApiResult<Json<ExpertWithOffice>> {
    let id = parse_id::<SalesExpert>(&id)?;
    let updated = state
        .store()
        .collection::<SalesExpert>()
        .update(id, patch)
        .await?;
    Ok(Json(sales::with_office(state.store(), updated).await?))
}
