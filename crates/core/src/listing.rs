//! Listing constants and helpers for the product collection endpoint.
//!
//! Pagination clamps and the sort allow-list live here so the HTTP layer can
//! normalise raw query input before anything reaches SQL.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// First page number; pages are 1-based.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of products per page.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Maximum number of products per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided page size into `[1, MAX_PER_PAGE]`.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

/// Row offset of the first item on `page`.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page - 1).saturating_mul(per_page)
}

/// Parse an integer query value, treating unparseable input as absent.
pub fn parse_int_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a product listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Id,
    Price,
    Name,
    Category,
    CreatedAt,
}

impl SortColumn {
    /// Resolve a `sort_by` value. Anything outside the allow-list is `Id`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price") => Self::Price,
            Some("name") => Self::Name,
            Some("category") => Self::Category,
            Some("created_at") => Self::CreatedAt,
            _ => Self::Id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `DESC` (any case) selects descending order; everything else is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing request / metadata
// ---------------------------------------------------------------------------

/// A fully normalised product listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    /// Substring matched against name OR description.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    pub sort_by: SortColumn,
    pub sort_dir: SortDirection,
    pub page: i64,
    pub per_page: i64,
}

impl ProductListing {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.per_page)
    }
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort_by: SortColumn::Id,
            sort_dir: SortDirection::Asc,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Treat empty filter strings as absent.
pub fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.is_empty()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
