use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use portal_cms_core::resources::career::{self, Applicant, ApplicantWithCareer};
use portal_cms_core::{DeleteAck, Document, Page};
use serde::Deserialize;
use serde_json::Value;

use super::crud::{self, parse_id, ListParams};
use crate::error::ApiResult;
use crate::extract::Params;
use crate::state::AppState;
use crate::uploads::FormPayload;

const UPLOAD_FOLDER: &str = "resumes";
const RESUME_FIELD: &str = "resume";

/// Job applications, optionally filtered by `careerId`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(apply))
        .route("/{id}", get(crud::get_one::<Applicant>).delete(remove))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicantParams {
    career_id: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

async fn list(
    State(state): State<AppState>,
    Params(params): Params<ApplicantParams>,
) -> ApiResult<Json<Page<ApplicantWithCareer>>> {
    let page = ListParams::window(params.page, params.limit).request::<Applicant>()?;
    let applicants =
        career::list_applicants(state.store(), params.career_id.as_deref(), page).await?;
    Ok(Json(applicants))
}

async fn apply(
    State(state): State<AppState>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Document<Applicant>>)> {
    let stored = state
        .uploads()
        .attach(&mut form, RESUME_FIELD, UPLOAD_FOLDER, "resumeUrl")
        .await?;
    let result = state
        .store()
        .collection::<Applicant>()
        .create_from(Value::Object(form.fields))
        .await;
    let applicant = state.uploads().settle(result, stored).await?;
    Ok((StatusCode::CREATED, Json(applicant)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id::<Applicant>(&id)?;
    let removed = state.store().collection::<Applicant>().delete(id).await?;
    if let Some(url) = &removed.body.resume_url {
        state.uploads().remove(url).await;
    }
    Ok(Json(DeleteAck::new(removed.id)))
}
