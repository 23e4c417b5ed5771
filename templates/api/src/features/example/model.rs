use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_PER_PAGE: i64 = 25;
const MAX_PER_PAGE: i64 = 1000;
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
}

impl ItemInput {
    pub fn validated_name(&self) -> Result<&str, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".into());
        }
        if name.len() > MAX_NAME_LEN {
            return Err(format!("name must be at most {MAX_NAME_LEN} characters"));
        }
        Ok(name)
    }
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            data,
            meta: Meta {
                total,
                page: pagination.page(),
                per_page: pagination.per_page(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        let p = Pagination::default();
        assert_eq!((p.page(), p.per_page(), p.offset()), (1, 25, 0));

        let p = Pagination { page: Some(3), per_page: Some(5000) };
        assert_eq!(p.per_page(), MAX_PER_PAGE);
        assert_eq!(p.offset(), 2 * MAX_PER_PAGE);
    }

    #[test]
    fn blank_names_are_rejected() {
        let input = ItemInput { name: "   ".into() };
        assert!(input.validated_name().is_err());
    }
}
