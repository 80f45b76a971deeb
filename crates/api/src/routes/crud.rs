//! Handlers shared by every JSON resource, generic over the schema.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use portal_cms_core::store::StoreResult;
use portal_cms_core::{DeleteAck, Document, DocumentId, Page, PageRequest, Resource, StoreError};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiResult;
use crate::extract::{Params, Payload};
use crate::state::AppState;

/// `page`/`limit` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn window(page: Option<u64>, limit: Option<u64>) -> Self {
        Self { page, limit }
    }

    pub fn request<R: Resource>(&self) -> StoreResult<Option<PageRequest>> {
        Ok(PageRequest::from_params(self.page, self.limit, R::PAGE_LIMIT)?)
    }
}

/// Parse a path id. Malformed ids cannot exist, so they are reported as not found.
pub fn parse_id<R: Resource>(raw: &str) -> Result<DocumentId, StoreError> {
    DocumentId::parse(raw).ok_or_else(|| StoreError::not_found(R::COLLECTION, raw))
}

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Params(params): Params<ListParams>,
) -> ApiResult<Json<Page<Document<R>>>> {
    let page = params.request::<R>()?;
    Ok(Json(state.store().collection::<R>().list(Vec::new(), page).await?))
}

pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document<R>>> {
    let id = parse_id::<R>(&id)?;
    Ok(Json(state.store().collection::<R>().get(id).await?))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Payload(payload): Payload<Value>,
) -> ApiResult<(StatusCode, Json<Document<R>>)> {
    let doc = state.store().collection::<R>().create_from(payload).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(patch): Payload<Map<String, Value>>,
) -> ApiResult<Json<Document<R>>> {
    let id = parse_id::<R>(&id)?;
    Ok(Json(state.store().collection::<R>().update(id, patch).await?))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id::<R>(&id)?;
    let removed = state.store().collection::<R>().delete(id).await?;
    Ok(Json(DeleteAck::new(removed.id)))
}
