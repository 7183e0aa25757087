//! Repository for the `products` table.

use catalog_core::listing::ProductListing;
use catalog_core::product::{NewProduct, ProductChanges};
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::Product;
use crate::query::{self, Assignment, BindValue, ProductQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, price, category, stock_quantity, created_at";

/// One page of a filtered listing plus the unpaged match count.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: i64,
}

/// Provides CRUD and listing operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the stored row.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, description, price, category, stock_quantity)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(input.stock_quantity)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of products matching the listing filters.
    ///
    /// The count and the page are two separate statements sharing the same
    /// WHERE clause, so `total` ignores `page` / `per_page`.
    pub async fn list(pool: &PgPool, listing: &ProductListing) -> Result<ProductPage, sqlx::Error> {
        let query = ProductQuery::from_listing(listing);

        let count_sql = query.count_sql();
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in query.bind_values() {
            count_q = count_q.bind(value);
        }
        let total = count_q.fetch_one(pool).await?;

        let select_sql = query.select_sql(COLUMNS);
        let mut select_q = sqlx::query_as::<_, Product>(&select_sql);
        for value in query.bind_values() {
            select_q = select_q.bind(value);
        }
        let items = select_q
            .bind(listing.per_page)
            .bind(listing.offset())
            .fetch_all(pool)
            .await?;

        Ok(ProductPage { items, total })
    }

    /// All products whose `category` text equals `category_name`.
    pub async fn list_by_category_name(
        pool: &PgPool,
        category_name: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE category = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Product>(&query)
            .bind(category_name)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only the columns present in `changes` are
    /// written.
    ///
    /// Returns `None` if no row with the given `id` exists. An empty change
    /// set performs no write and returns the current row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, sqlx::Error> {
        let sets = query::assignments(changes);
        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let sql = query::update_sql(&sets, COLUMNS);
        bind_assignments(sqlx::query_as::<_, Product>(&sql).bind(id), &sets)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Bind SET assignment values to a sqlx `QueryAs`.
fn bind_assignments<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    sets: &'q [Assignment],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for set in sets {
        match &set.value {
            BindValue::Text(v) => q = q.bind(v.as_deref()),
            BindValue::Decimal(v) => q = q.bind(*v),
            BindValue::Int(v) => q = q.bind(*v),
        }
    }
    q
}
