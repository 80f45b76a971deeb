use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use portal_cms_core::resources::GalleryImage;
use portal_cms_core::store::Condition;
use portal_cms_core::{DeleteAck, Document, DocumentId, Page, ValidationError};
use serde::Deserialize;
use serde_json::Value;

use super::crud::{parse_id, ListParams};
use crate::error::ApiResult;
use crate::extract::Params;
use crate::state::AppState;
use crate::uploads::{FormPayload, UploadedFile};

const UPLOAD_FOLDER: &str = "gallery";
const IMAGE_FIELD: &str = "image";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(upload))
        .route("/{id}", delete(remove))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryParams {
    event_id: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

async fn list(
    State(state): State<AppState>,
    Params(params): Params<GalleryParams>,
) -> ApiResult<Json<Page<Document<GalleryImage>>>> {
    let page = ListParams::window(params.page, params.limit).request::<GalleryImage>()?;
    let conditions = params
        .event_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| vec![Condition::eq("eventId", id)])
        .unwrap_or_default();
    let images = state
        .store()
        .collection::<GalleryImage>()
        .list(conditions, page)
        .await?;
    Ok(Json(images))
}

/// Store one uploaded file as a gallery image.
pub(super) async fn store_image(
    state: &AppState,
    file: &UploadedFile,
    event_id: Option<DocumentId>,
    caption: Option<String>,
) -> ApiResult<Document<GalleryImage>> {
    let file_url = state.uploads().save(UPLOAD_FOLDER, file).await?;
    let result = state
        .store()
        .collection::<GalleryImage>()
        .create(GalleryImage {
            file_url: file_url.clone(),
            event_id,
            caption,
        })
        .await;
    state.uploads().settle(result, Some(file_url)).await
}

/// Undo [`store_image`] for a batch that could not be completed.
pub(super) async fn discard(state: &AppState, images: Vec<Document<GalleryImage>>) {
    let collection = state.store().collection::<GalleryImage>();
    for image in images {
        if let Err(err) = collection.delete(image.id).await {
            tracing::warn!(id = %image.id, "failed to discard gallery image: {err}");
        }
        state.uploads().remove(&image.body.file_url).await;
    }
}

async fn upload(
    State(state): State<AppState>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Document<GalleryImage>>)> {
    if !form.files.iter().any(|file| file.field == IMAGE_FIELD) {
        return Err(ValidationError::MissingField("image").into());
    }
    let stored = state
        .uploads()
        .attach(&mut form, IMAGE_FIELD, UPLOAD_FOLDER, "fileUrl")
        .await?;
    let result = state
        .store()
        .collection::<GalleryImage>()
        .create_from(Value::Object(form.fields))
        .await;
    let image = state.uploads().settle(result, stored).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id::<GalleryImage>(&id)?;
    let removed = state.store().collection::<GalleryImage>().delete(id).await?;
    state.uploads().remove(&removed.body.file_url).await;
    Ok(Json(DeleteAck::new(removed.id)))
}
