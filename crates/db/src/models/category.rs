//! Category row model.
//!
//! Products reference categories by `name`, not by id.

use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A category row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}
