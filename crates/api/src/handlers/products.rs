//! Handlers for the `products` resource.
//!
//! Each handler takes plain values from the dispatcher and returns an
//! [`Envelope`]. Create and update always return the row as stored, never
//! an echo of the request body.

use axum::http::StatusCode;
use catalog_core::error::CoreError;
use catalog_core::listing::Pagination;
use catalog_core::product::{validate_changes, validate_new};
use catalog_core::types::DbId;
use catalog_db::models::product::Product;
use catalog_db::repositories::ProductRepo;
use catalog_db::DbPool;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::query::ProductListParams;
use crate::response::Envelope;

/// GET /api/products
///
/// Paginated listing with optional `q` / `category` filters and an
/// allow-listed sort.
pub async fn list_products(
    pool: &DbPool,
    params: ProductListParams,
) -> AppResult<Envelope<Vec<Product>>> {
    let listing = params.into_listing();
    let page = ProductRepo::list(pool, &listing).await?;

    Ok(
        Envelope::success(page.items, "Products retrieved successfully").with_pagination(
            Pagination {
                total: page.total,
                page: listing.page,
                per_page: listing.per_page,
            },
        ),
    )
}

/// GET /api/products/{id}
pub async fn get_product(pool: &DbPool, id: DbId) -> AppResult<Envelope<Product>> {
    let product = find_product(pool, id).await?;
    Ok(Envelope::success(product, "Product retrieved successfully"))
}

/// POST /api/products
pub async fn create_product(pool: &DbPool, body: &[u8]) -> AppResult<Envelope<Product>> {
    let input = parse_object(body)?;
    let new_product = validate_new(&input).map_err(CoreError::from)?;

    let product = ProductRepo::create(pool, &new_product).await?;

    tracing::info!(product_id = product.id, "Product created");

    Ok(Envelope::success(product, "Product created successfully").with_status(StatusCode::CREATED))
}

/// PUT /api/products/{id}
///
/// Only fields present in the body change. Existence is checked before the
/// fields are validated, so an unknown id is 404 even when the body names
/// no recognised field.
pub async fn update_product(
    pool: &DbPool,
    id: DbId,
    body: &[u8],
) -> AppResult<Envelope<Product>> {
    let input = parse_object(body)?;
    find_product(pool, id).await?;

    let changes = validate_changes(&input).map_err(CoreError::from)?;

    let product = ProductRepo::update(pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    tracing::info!(product_id = id, "Product updated");

    Ok(Envelope::success(product, "Product updated successfully"))
}

/// DELETE /api/products/{id}
pub async fn delete_product(pool: &DbPool, id: DbId) -> AppResult<Envelope<()>> {
    let deleted = ProductRepo::delete(pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(Envelope::message_only("Product deleted successfully"))
}

async fn find_product(pool: &DbPool, id: DbId) -> AppResult<Product> {
    ProductRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
}

/// Parse a request body that must be a JSON object.
fn parse_object(body: &[u8]) -> AppResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(AppError::BadRequest("Invalid JSON".into())),
    }
}
