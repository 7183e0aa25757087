//! Product row model.

use catalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A product row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Serialized as a JSON number, not a string.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub created_at: Timestamp,
}
