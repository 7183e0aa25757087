pub mod health;
pub mod resolve;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, AppResult};
use crate::handlers::{categories, products};
use crate::query::ProductListParams;
use crate::state::AppState;

use resolve::{resolve, Resolution, Route};

/// Fallback handler serving every `/api` request.
///
/// Resolves the method and path positionally, then hands plain values
/// (ids, parsed query parameters, raw body bytes) to the matching handler.
/// Every [`Resolution`] produces a response.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let result = match resolve(&method, uri.path()) {
        Resolution::Preflight => return StatusCode::NO_CONTENT.into_response(),
        Resolution::Matched(route) => run(route, &state, &uri, &body).await,
        Resolution::UnknownItem(entity) => Err(AppError::NotFound(format!("{entity} not found"))),
        Resolution::MethodNotAllowed => Err(AppError::MethodNotAllowed),
        Resolution::NotFound => Err(AppError::NotFound("Route not found".into())),
    };

    match result {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(%method, path = uri.path(), error = %err, "Request failed");
            err.into_response()
        }
    }
}

async fn run(route: Route, state: &AppState, uri: &Uri, body: &[u8]) -> AppResult<Response> {
    let pool = &state.pool;
    let response = match route {
        Route::ListProducts => {
            // Query parameters never reject the request.
            let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
                .map(|Query(pairs)| pairs)
                .unwrap_or_default();
            let params = ProductListParams::from_pairs(pairs);
            products::list_products(pool, params).await?.into_response()
        }
        Route::CreateProduct => products::create_product(pool, body).await?.into_response(),
        Route::GetProduct(id) => products::get_product(pool, id).await?.into_response(),
        Route::UpdateProduct(id) => products::update_product(pool, id, body).await?.into_response(),
        Route::DeleteProduct(id) => products::delete_product(pool, id).await?.into_response(),
        Route::ListCategories => categories::list_categories(pool).await?.into_response(),
        Route::CategoryProducts(id) => {
            categories::list_category_products(pool, id).await?.into_response()
        }
    };
    Ok(response)
}
