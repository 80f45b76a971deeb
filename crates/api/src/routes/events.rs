use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use portal_cms_core::resources::{Event, GalleryImage};
use portal_cms_core::{DeleteAck, Document, Page, ValidationError};
use serde_json::Value;

use super::crud::{self, parse_id};
use super::gallery;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::uploads::FormPayload;

const UPLOAD_FOLDER: &str = "events";
const IMAGE_FIELD: &str = "image";
const GALLERY_FIELD: &str = "images";

/// Events and their image galleries.
///
/// Deleting an event leaves its gallery images in place.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<Event>).post(create))
        .route("/{id}", get(crud::get_one::<Event>).put(update).delete(remove))
        .route("/{id}/images", get(list_images).post(upload_images))
}

async fn create(
    State(state): State<AppState>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Document<Event>>)> {
    let stored = state
        .uploads()
        .attach(&mut form, IMAGE_FIELD, UPLOAD_FOLDER, "imageUrl")
        .await?;
    let result = state
        .store()
        .collection::<Event>()
        .create_from(Value::Object(form.fields))
        .await;
    let event = state.uploads().settle(result, stored).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormPayload,
) -> ApiResult<Json<Document<Event>>> {
    let id = parse_id::<Event>(&id)?;
    let events = state.store().collection::<Event>();
    let previous = events.get(id).await?;

    let stored = state
        .uploads()
        .attach(&mut form, IMAGE_FIELD, UPLOAD_FOLDER, "imageUrl")
        .await?;
    let result = events.update(id, form.fields).await;
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
    let id = parse_id::<Event>(&id)?;
    let removed = state.store().collection::<Event>().delete(id).await?;
    if let Some(url) = &removed.body.image_url {
        state.uploads().remove(url).await;
    }
    Ok(Json(DeleteAck::new(removed.id)))
}

async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Page<Document<GalleryImage>>>> {
    let id = parse_id::<Event>(&id)?;
    state.store().collection::<Event>().get(id).await?;
    let images = state
        .store()
        .collection::<GalleryImage>()
        .list(vec![GalleryImage::of_event(id)], None)
        .await?;
    Ok(Json(images))
}

/// Add every file sent under `images` to the event's gallery.
///
/// All or nothing: a failure part way removes the images already stored.
async fn upload_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Vec<Document<GalleryImage>>>)> {
    let id = parse_id::<Event>(&id)?;
    state.store().collection::<Event>().get(id).await?;

    let files = form.take_files(GALLERY_FIELD);
    let caption = form
        .fields
        .get("caption")
        .and_then(Value::as_str)
        .map(str::to_string);

    if files.is_empty() {
        return Err(ValidationError::MissingField("images").into());
    }

    let mut created = Vec::with_capacity(files.len());
    for file in &files {
        match gallery::store_image(&state, file, Some(id), caption.clone()).await {
            Ok(image) => created.push(image),
            Err(err) => {
                gallery::discard(&state, created).await;
                return Err(err);
            }
        }
    }
    Ok((StatusCode::CREATED, Json(created)))
}
