//! Handlers for the read-only `categories` resource.

use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::Category;
use catalog_db::models::product::Product;
use catalog_db::repositories::{CategoryRepo, ProductRepo};
use catalog_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::Envelope;

/// GET /api/categories
///
/// All categories ordered by name; not paginated.
pub async fn list_categories(pool: &DbPool) -> AppResult<Envelope<Vec<Category>>> {
    let categories = CategoryRepo::list(pool).await?;
    Ok(Envelope::success(categories, "Categories retrieved"))
}

/// GET /api/categories/{id}/products
///
/// Resolves the category name, then matches products whose `category` text
/// equals it.
pub async fn list_category_products(
    pool: &DbPool,
    category_id: DbId,
) -> AppResult<Envelope<Vec<Product>>> {
    let category = CategoryRepo::find_by_id(pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    let products = ProductRepo::list_by_category_name(pool, &category.name).await?;

    Ok(Envelope::success(products, "Products by category retrieved"))
}
