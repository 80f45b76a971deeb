use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use portal_cms_core::resources::inquiry::{self, Inquiry, InquiryStats};

use super::crud;
use crate::error::ApiResult;
use crate::state::AppState;

/// Contact form submissions. There is no update or delete path.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<Inquiry>).post(crud::create::<Inquiry>))
        .route("/stats", get(stats))
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<InquiryStats>> {
    Ok(Json(inquiry::stats(state.store(), Utc::now()).await?))
}
