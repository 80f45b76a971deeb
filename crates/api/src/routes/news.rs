use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use portal_cms_core::resources::News;
use portal_cms_core::{DeleteAck, Document};
use serde_json::Value;

use super::crud::{self, parse_id};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::uploads::FormPayload;

const UPLOAD_FOLDER: &str = "news";
const IMAGE_FIELD: &str = "image";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<News>).post(create))
        .route("/{id}", get(crud::get_one::<News>).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Document<News>>)> {
    let stored = state
        .uploads()
        .attach(&mut form, IMAGE_FIELD, UPLOAD_FOLDER, "imageUrl")
        .await?;
    let result = state
        .store()
        .collection::<News>()
        .create_from(Value::Object(form.fields))
        .await;
    let news = state.uploads().settle(result, stored).await?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// Edit text fields; a new image replaces the old one, no image keeps it.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormPayload,
) -> ApiResult<Json<Document<News>>> {
    let id = parse_id::<News>(&id)?;
    let collection = state.store().collection::<News>();
    let previous = collection.get(id).await?;

    let stored = state
        .uploads()
        .attach(&mut form, IMAGE_FIELD, UPLOAD_FOLDER, "imageUrl")
        .await?;
    let result = collection.update(id, form.fields).await;
    let updated = state.uploads().settle(result, stored).await?;

    state
        .uploads()
        .remove_replaced(
            previous.body.image_url.as_deref(),
            updated.body.image_url.as_deref(),
        )
        .await;
    Ok(Json(updated))
}

async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id::<News>(&id)?;
    let removed = state.store().collection::<News>().delete(id).await?;
    if let Some(url) = &removed.body.image_url {
        state.uploads().remove(url).await;
    }
    Ok(Json(DeleteAck::new(removed.id)))
}
