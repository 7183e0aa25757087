//! Product input validation.
//!
//! Request bodies arrive as loosely-typed JSON objects. The functions here
//! turn them into [`NewProduct`] / [`ProductChanges`] or a typed
//! [`ValidationError`]; nothing is silently coerced except the documented
//! `stock_quantity` default when the field is absent.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};

/// Stock assigned to a new product when the body omits `stock_quantity`.
pub const DEFAULT_STOCK_QUANTITY: i32 = 0;

/// Decimal places kept for `price`, matching the `NUMERIC(10,2)` column.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound for `price`, matching the `NUMERIC(10,2)` column.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Why a product body was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing name or price")]
    MissingNameOrPrice,

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Price must be numeric")]
    InvalidPrice,

    #[error("Price must not be negative")]
    NegativePrice,

    #[error("Price must be less than 100000000")]
    PriceOutOfRange,

    #[error("Stock quantity must be a whole number")]
    InvalidStock,

    #[error("Stock quantity must not be negative")]
    NegativeStock,

    #[error("Field '{field}' must be a string")]
    InvalidText { field: &'static str },

    #[error("No fields to update")]
    NoFields,
}

/// A validated product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub stock_quantity: i32,
}

/// A validated partial update.
///
/// `None` leaves the stored column untouched. For the nullable columns,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category: Option<Option<String>>,
    pub stock_quantity: Option<i32>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.stock_quantity.is_none()
    }
}

/// Validate a create body.
///
/// `name` and `price` are required; `stock_quantity` defaults to
/// [`DEFAULT_STOCK_QUANTITY`] when absent or null.
pub fn validate_new(body: &Map<String, Value>) -> Result<NewProduct, ValidationError> {
    let name = text_field(body, "name")?.filter(|n| !n.is_empty());
    let price = present(body, "price").map(parse_price).transpose()?;

    let (Some(name), Some(price)) = (name, price) else {
        return Err(ValidationError::MissingNameOrPrice);
    };

    let description = text_field(body, "description")?.and_then(blank_to_none);
    let category = text_field(body, "category")?.and_then(blank_to_none);
    let stock_quantity = present(body, "stock_quantity")
        .map(parse_stock)
        .transpose()?
        .unwrap_or(DEFAULT_STOCK_QUANTITY);

    Ok(NewProduct {
        name,
        description,
        price,
        category,
        stock_quantity,
    })
}

/// Validate an update body. Only present, non-null fields are recognised.
pub fn validate_changes(body: &Map<String, Value>) -> Result<ProductChanges, ValidationError> {
    let name = match text_field(body, "name")? {
        Some(n) if n.is_empty() => return Err(ValidationError::EmptyName),
        other => other,
    };

    let changes = ProductChanges {
        name,
        description: text_field(body, "description")?.map(blank_to_none),
        price: present(body, "price").map(parse_price).transpose()?,
        category: text_field(body, "category")?.map(blank_to_none),
        stock_quantity: present(body, "stock_quantity").map(parse_stock).transpose()?,
    };

    if changes.is_empty() {
        return Err(ValidationError::NoFields);
    }
    Ok(changes)
}

/// A field counts as supplied only when present and not `null`.
fn present<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

/// Read an optional string field, trimmed.
fn text_field(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match present(body, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(ValidationError::InvalidText { field }),
    }
}

fn blank_to_none(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Accept a JSON number or a numeric string.
///
/// The value is rounded to [`PRICE_SCALE`] places half away from zero, as
/// the column would, before the range check.
fn parse_price(value: &Value) -> Result<Decimal, ValidationError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(ValidationError::InvalidPrice),
    };

    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| ValidationError::InvalidPrice)?
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);

    if price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }
    if price >= PRICE_LIMIT {
        return Err(ValidationError::PriceOutOfRange);
    }
    Ok(price.normalize())
}

/// Accept an integral JSON number or an integer string.
fn parse_stock(value: &Value) -> Result<i32, ValidationError> {
    let whole = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or(ValidationError::InvalidStock)?;

    if whole < 0 {
        return Err(ValidationError::NegativeStock);
    }
    i32::try_from(whole).map_err(|_| ValidationError::InvalidStock)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
