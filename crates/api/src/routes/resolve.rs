//! Positional route resolution for `/api`.
//!
//! The path is split into non-empty segments and matched by segment count
//! and literal values at fixed positions:
//!
//! ```text
//! api/products[/...]                  GET list, POST create
//! api/products/{id}[/...]             GET, PUT, DELETE
//! api/categories                      GET list
//! api/categories/{id}/products[/...]  GET products in category
//! ```
//!
//! Segments after the product id are ignored. Every (method, resource,
//! parameter-presence) combination resolves to an explicit [`Resolution`].
//! Category paths of any other shape (`api/categories/{id}`,
//! `api/categories/{id}/items`) are 404 "Route not found" rather than 405,
//! since no method is served there.

use axum::http::Method;
use catalog_core::types::DbId;

/// A matched endpoint with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListProducts,
    CreateProduct,
    GetProduct(DbId),
    UpdateProduct(DbId),
    DeleteProduct(DbId),
    ListCategories,
    CategoryProducts(DbId),
}

/// Outcome of resolving a method and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(Route),
    /// CORS preflight; answered with 204 and no body.
    Preflight,
    /// The path shape matched but its id segment cannot name a row.
    UnknownItem(&'static str),
    MethodNotAllowed,
    NotFound,
}

/// Resolve a request method and path to a [`Resolution`].
pub fn resolve(method: &Method, path: &str) -> Resolution {
    if *method == Method::OPTIONS {
        return Resolution::Preflight;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["api", "products", rest @ ..] => products(method, rest.first().copied()),
        ["api", "categories"] => categories(method),
        ["api", "categories", id, "products", ..] => category_products(method, id),
        _ => Resolution::NotFound,
    }
}

fn products(method: &Method, id: Option<&str>) -> Resolution {
    match (method, id) {
        (&Method::GET, None) => Resolution::Matched(Route::ListProducts),
        (&Method::POST, None) => Resolution::Matched(Route::CreateProduct),
        (&Method::GET, Some(id)) => item("Product", id, Route::GetProduct),
        (&Method::PUT, Some(id)) => item("Product", id, Route::UpdateProduct),
        (&Method::DELETE, Some(id)) => item("Product", id, Route::DeleteProduct),
        _ => Resolution::MethodNotAllowed,
    }
}

fn categories(method: &Method) -> Resolution {
    match *method {
        Method::GET => Resolution::Matched(Route::ListCategories),
        _ => Resolution::MethodNotAllowed,
    }
}

fn category_products(method: &Method, id: &str) -> Resolution {
    match *method {
        Method::GET => item("Category", id, Route::CategoryProducts),
        _ => Resolution::MethodNotAllowed,
    }
}

/// Build an item route from a numeric id segment.
fn item(entity: &'static str, segment: &str, route: fn(DbId) -> Route) -> Resolution {
    match segment.parse::<DbId>() {
        Ok(id) => Resolution::Matched(route(id)),
        Err(_) => Resolution::UnknownItem(entity),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
