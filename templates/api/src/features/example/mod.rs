//! Template resource. Copy or rename this module for each real resource.

pub mod db;
pub mod handlers;
pub mod model;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::list).post(handlers::create))
        .route(
            "/items/{id}",
            get(handlers::show)
                .patch(handlers::update)
                .delete(handlers::remove),
        )
}
