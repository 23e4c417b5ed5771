use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::{
    db,
    model::{Item, ItemInput, Page, Pagination},
};
use crate::{
    error::{AppError, Result},
    state::AppState,
};

pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<Item>>> {
    let total = db::count(&state.db).await?;
    let items = db::list(&state.db, pagination.per_page(), pagination.offset()).await?;
    Ok(Json(Page::new(items, total, &pagination)))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Item>> {
    Ok(Json(db::find(&state.db, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>)> {
    let name = input.validated_name().map_err(AppError::BadRequest)?;
    let item = db::insert(&state.db, name).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>> {
    let name = input.validated_name().map_err(AppError::BadRequest)?;
    Ok(Json(db::update(&state.db, id, name).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    db::soft_delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
