use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use portal_cms_core::resources::office::{self, LocationWithType, OfficeLocation, OfficeType};
use portal_cms_core::Page;
use serde::Deserialize;
use serde_json::Value;

use super::crud::{self, parse_id, ListParams};
use crate::error::ApiResult;
use crate::extract::{Params, Payload};
use crate::state::AppState;

/// Office types and locations.
///
/// - `GET/POST /types`, `PUT/DELETE /types/{id}`
/// - `GET /locations?typeId=`, `POST /locations`
/// - `GET/PUT/DELETE /locations/{id}`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/types",
            get(crud::list::<OfficeType>).post(crud::create::<OfficeType>),
        )
        .route(
            "/types/{id}",
            put(crud::update::<OfficeType>).delete(crud::delete::<OfficeType>),
        )
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/{id}",
            get(get_location)
                .put(update_location)
                .delete(crud::delete::<OfficeLocation>),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationParams {
    type_id: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

async fn list_locations(
    State(state): State<AppState>,
    Params(params): Params<LocationParams>,
) -> ApiResult<Json<Page<LocationWithType>>> {
    let page = ListParams::window(params.page, params.limit).request::<OfficeLocation>()?;
    let locations = office::list_locations(state.store(), params.type_id.as_deref(), page).await?;
    Ok(Json(locations))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LocationWithType>> {
    let id = parse_id::<OfficeLocation>(&id)?;
    Ok(Json(office::get_location(state.store(), id).await?))
}

async fn create_location(
    State(state): State<AppState>,
    Payload(payload): Payload<Value>,
) -> ApiResult<(StatusCode, Json<LocationWithType>)> {
    let created = state
        .store()
        .collection::<OfficeLocation>()
        .create_from(payload)
        .await?;
    let joined = office::get_location(state.store(), created.id).await?;
    Ok((StatusCode::CREATED, Json(joined)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(patch): Payload<serde_json::Map<String, Value>>,
) -> ApiResult<Json<LocationWithType>> {
    let id = parse_id::<OfficeLocation>(&id)?;
    let updated = state
        .store()
        .collection::<OfficeLocation>()
        .update(id, patch)
        .await?;
    Ok(Json(office::get_location(state.store(), updated.id).await?))
}
