//! One module per resource. Register each router below.

pub mod example;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(example::router())
}
