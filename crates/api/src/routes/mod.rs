pub mod applicants;
pub mod contact;
pub mod crud;
pub mod events;
pub mod gallery;
pub mod health;
pub mod investor;
pub mod news;
pub mod office;
pub mod partner;
pub mod sales_experts;
pub mod simple;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::uploads::PUBLIC_PREFIX;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads().root());

    Router::new()
        .merge(health::routes())
        .nest("/api/investor", investor::routes())
        .nest("/api/office", office::routes())
        .nest("/api/contact", contact::routes())
        .nest("/api/partner", partner::routes())
        .nest("/api/gallery", gallery::routes())
        .nest("/api/news", news::routes())
        .nest("/api/events", events::routes())
        .nest("/api/careers", simple::careers())
        .nest("/api/applicants", applicants::routes())
        .nest("/api/sales-experts", sales_experts::routes())
        .nest("/api/team-members", simple::team_members())
        .nest("/api/blogs", simple::blogs())
        .nest("/api/videos", simple::videos())
        .nest_service(PUBLIC_PREFIX, uploads)
        .with_state(state)
}
