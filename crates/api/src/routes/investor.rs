use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use portal_cms_core::resources::investor::{
    self, CategoryReports, InvestorCategory, InvestorReport, InvestorStats, ReportWithCategory,
};
use portal_cms_core::{DeleteAck, Document, Page};
use serde::Deserialize;
use serde_json::Value;

use super::crud::{self, parse_id, ListParams};
use crate::error::ApiResult;
use crate::extract::Params;
use crate::state::AppState;
use crate::uploads::FormPayload;

const UPLOAD_FOLDER: &str = "investor";
const FILE_FIELD: &str = "file";

/// Investor relations: categories, reports and the dashboard stats.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route(
            "/categories",
            get(crud::list::<InvestorCategory>).post(crud::create::<InvestorCategory>),
        )
        .route("/categories/{id}", delete(crud::delete::<InvestorCategory>))
        .route("/category/{slug}", get(reports_by_category))
        .route("/reports", get(list_reports))
        .route("/report", post(create_report))
        .route(
            "/report/{id}",
            get(crud::get_one::<InvestorReport>)
                .put(update_report)
                .delete(delete_report),
        )
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<InvestorStats>> {
    Ok(Json(investor::stats(state.store()).await?))
}

async fn list_reports(
    State(state): State<AppState>,
    Params(params): Params<ListParams>,
) -> ApiResult<Json<Page<ReportWithCategory>>> {
    let page = params.request::<InvestorReport>()?;
    Ok(Json(investor::list_reports(state.store(), page).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryParams {
    #[serde(default)]
    is_admin: bool,
}

async fn reports_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Params(params): Params<CategoryParams>,
) -> ApiResult<Json<CategoryReports>> {
    let reports = investor::reports_by_category(state.store(), &slug, params.is_admin).await?;
    Ok(Json(reports))
}

async fn create_report(
    State(state): State<AppState>,
    mut form: FormPayload,
) -> ApiResult<(StatusCode, Json<Document<InvestorReport>>)> {
    let stored = state
        .uploads()
        .attach(&mut form, FILE_FIELD, UPLOAD_FOLDER, "fileUrl")
        .await?;

    let result = state
        .store()
        .collection::<InvestorReport>()
        .create_from(Value::Object(form.fields))
        .await;
    let report = state.uploads().settle(result, stored).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormPayload,
) -> ApiResult<Json<Document<InvestorReport>>> {
    let id = parse_id::<InvestorReport>(&id)?;
    let reports = state.store().collection::<InvestorReport>();
    let previous = reports.get(id).await?;

    let stored = state
        .uploads()
        .attach(&mut form, FILE_FIELD, UPLOAD_FOLDER, "fileUrl")
        .await?;
    let result = reports.update(id, form.fields).await;
    let updated = state.uploads().settle(result, stored).await?;

    state
        .uploads()
        .remove_replaced(Some(&previous.body.file_url), Some(&updated.body.file_url))
        .await;
    Ok(Json(updated))
}

async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id::<InvestorReport>(&id)?;
    let removed = state.store().collection::<InvestorReport>().delete(id).await?;
    state.uploads().remove(&removed.body.file_url).await;
    Ok(Json(DeleteAck::new(removed.id)))
}
