use sqlx::PgPool;
use uuid::Uuid;

use super::model::Item;
use crate::error::{AppError, Result};

const COLUMNS: &str = "id, name, created_at, updated_at, deleted_at";

pub async fn count(pool: &PgPool) -> Result<i64> {
    let total = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Item>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM items WHERE deleted_at IS NULL \
         ORDER BY created_at LIMIT $1 OFFSET $2"
    );
    let items = sqlx::query_as(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Item> {
    let sql = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND deleted_at IS NULL");
    sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn insert(pool: &PgPool, name: &str) -> Result<Item> {
    let sql = format!(
        "INSERT INTO items (id, name) VALUES (gen_random_uuid(), $1) RETURNING {COLUMNS}"
    );
    let item = sqlx::query_as(&sql).bind(name).fetch_one(pool).await?;
    Ok(item)
}

pub async fn update(pool: &PgPool, id: Uuid, name: &str) -> Result<Item> {
    let sql = format!(
        "UPDATE items SET name = $2, updated_at = NOW() \
         WHERE id = $1 AND deleted_at IS NULL RETURNING {COLUMNS}"
    );
    sqlx::query_as(&sql)
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<()> {
    let done = sqlx::query("UPDATE items SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
