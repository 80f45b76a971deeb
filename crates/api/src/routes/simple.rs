//! Resources with a plain JSON CRUD surface and no joins or uploads.

use axum::{routing::get, Router};
use portal_cms_core::resources::{Blog, Career, TeamMember, Video};
use portal_cms_core::Resource;

use super::crud;
use crate::state::AppState;

/// `GET/POST /` and `GET/PUT/PATCH/DELETE /{id}` for one resource.
pub fn routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list::<R>).post(crud::create::<R>))
        .route(
            "/{id}",
            get(crud::get_one::<R>)
                .put(crud::update::<R>)
                .patch(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}

pub fn blogs() -> Router<AppState> {
    routes::<Blog>()
}

pub fn careers() -> Router<AppState> {
    routes::<Career>()
}

pub fn team_members() -> Router<AppState> {
    routes::<TeamMember>()
}

pub fn videos() -> Router<AppState> {
    routes::<Video>()
}
