//! Repository for the `categories` table (read-only).

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::Category;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides read operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
