use sqlx::SqlitePool;

use crate::error::{is_unique_violation, Error, Result};
use crate::middleware::auth::Identity;
use crate::models::category::Category;

#[derive(Clone)]
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        let items = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Catalogue maintenance is reserved to staff.
    pub async fn create(&self, identity: &Identity, name: &str) -> Result<Category> {
        if !identity.is_staff {
            return Err(Error::Unauthorized("Only staff can manage categories".into()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BadRequest("Category name is required".into()));
        }

        sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::Conflict(format!("Category '{}' already exists", name))
                } else {
                    Error::from(e)
                }
            })
    }
}
