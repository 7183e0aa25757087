//! HTTP-level integration tests for the products resource.
//!
//! Uses tower::ServiceExt to send requests directly to the router without
//! an actual TCP listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_product, delete, get, post_json, put_json, send};
use serde_json::json;
use sqlx::PgPool;

fn assert_price(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().expect("price should be a JSON number");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected price {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn product_lifecycle_create_get_update_delete(pool: PgPool) {
    // Create.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/products",
        json!({"name": "Widget", "price": 12.5}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "success");
    assert_eq!(created["message"], "Product created successfully");
    let data = &created["data"];
    assert!(data["id"].is_number());
    assert_eq!(data["name"], "Widget");
    assert_eq!(data["stock_quantity"], 0);
    assert_price(&data["price"], 12.5);
    assert!(data["created_at"].is_string());
    let id = data["id"].as_i64().unwrap();

    // Read back: identical record.
    let response = get(common::build_test_app(pool.clone()), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(fetched["message"], "Product retrieved successfully");

    // Partial update.
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/products/{id}"),
        json!({"stock_quantity": 3}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["stock_quantity"], 3);
    assert_price(&updated["data"]["price"], 12.5);
    assert_eq!(updated["data"]["name"], "Widget");
    assert_eq!(updated["message"], "Product updated successfully");

    // Delete.
    let response = delete(common::build_test_app(pool.clone()), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["status"], "success");
    assert_eq!(deleted["message"], "Product deleted successfully");
    assert!(deleted.get("data").is_none());

    // Gone.
    let response = get(common::build_test_app(pool), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], 404);
    assert_eq!(json["message"], "Product not found");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_all_fields_returns_stored_values(pool: PgPool) {
    let data = create_product(
        &pool,
        json!({
            "name": "  Desk Lamp ",
            "description": "Warm light",
            "price": "19.99",
            "category": "Home",
            "stock_quantity": 4
        }),
    )
    .await;

    assert_eq!(data["name"], "Desk Lamp");
    assert_eq!(data["description"], "Warm light");
    assert_eq!(data["category"], "Home");
    assert_eq!(data["stock_quantity"], 4);
    assert_price(&data["price"], 19.99);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_without_name_or_price_returns_422(pool: PgPool) {
    for body in [json!({"price": 5}), json!({"name": "No price"}), json!({"name": "", "price": 5})] {
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/products", body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], 422);
        assert_eq!(json["message"], "Missing name or price");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_negative_values_returns_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/products",
        json!({"name": "Bad", "price": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json(
        common::build_test_app(pool),
        "/api/products",
        json!({"name": "Bad", "price": 1, "stock_quantity": -5}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_price_rounding_past_column_limit_returns_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/products",
        json!({"name": "Edge", "price": 99999999.999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], 422);
    assert_eq!(json["message"], "Price must be less than 100000000");

    let data = create_product(&pool, json!({"name": "Edge", "price": 99999999.99})).await;
    assert_price(&data["price"], 99999999.99);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_malformed_json_returns_400(pool: PgPool) {
    let response = send(
        common::build_test_app(pool),
        Method::POST,
        "/api/products",
        Some("{\"name\": "),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid JSON");
    assert_eq!(json["code"], 400);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_price_leaves_other_fields_unchanged(pool: PgPool) {
    let created = create_product(
        &pool,
        json!({
            "name": "Kettle",
            "description": "Boils water",
            "price": 35,
            "category": "Home",
            "stock_quantity": 5
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/products/{id}"),
        json!({"price": 9.99}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_price(&data["price"], 9.99);
    assert_eq!(data["name"], created["name"]);
    assert_eq!(data["description"], created["description"]);
    assert_eq!(data["category"], created["category"]);
    assert_eq!(data["stock_quantity"], 5);
    assert_eq!(data["created_at"], created["created_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_no_recognized_fields_returns_422(pool: PgPool) {
    let created = create_product(&pool, json!({"name": "Thing", "price": 1})).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/products/{id}"),
        json!({"colour": "red"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["message"], "No fields to update");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_unknown_product_returns_404(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/api/products/999999",
        json!({"price": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_malformed_json_returns_400(pool: PgPool) {
    let created = create_product(&pool, json!({"name": "Thing", "price": 1})).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        common::build_test_app(pool),
        Method::PUT,
        &format!("/api/products/{id}"),
        Some("not json"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_empty_category_clears_it(pool: PgPool) {
    let created = create_product(&pool, json!({"name": "Thing", "price": 1, "category": "Toys"})).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/products/{id}"),
        json!({"category": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["category"].is_null());
}

// ---------------------------------------------------------------------------
// Delete / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_product_returns_404_without_mutation(pool: PgPool) {
    create_product(&pool, json!({"name": "Keep me", "price": 1})).await;

    let response = delete(common::build_test_app(pool.clone()), "/api/products/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_with_non_numeric_id_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/products/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

async fn seed(pool: &PgPool) {
    let rows = [
        json!({"name": "Desk Lamp", "price": 19.99, "category": "Home", "description": "LED"}),
        json!({"name": "Kettle", "price": 35, "category": "Home"}),
        json!({"name": "Novel", "price": 8.99, "category": "Books", "description": "A gripping lamp-lit tale"}),
        json!({"name": "Robot", "price": 49.99, "category": "Toys"}),
        json!({"name": "Puzzle", "price": 12, "category": "Toys"}),
    ];
    for row in rows {
        create_product(pool, row).await;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_pagination_metadata(pool: PgPool) {
    seed(&pool).await;

    let response = get(common::build_test_app(pool), "/api/products?page=2&per_page=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Products retrieved successfully");
    assert_eq!(json["pagination"], json!({"total": 5, "page": 2, "per_page": 2}));
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Novel", "Robot"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_page_beyond_range_is_empty_not_error(pool: PgPool) {
    seed(&pool).await;

    let response = get(common::build_test_app(pool), "/api/products?page=99").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["pagination"]["total"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_clamps_per_page(pool: PgPool) {
    seed(&pool).await;

    let response = get(common::build_test_app(pool.clone()), "/api/products?per_page=0").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["per_page"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/api/products?per_page=1000").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["per_page"], 100);
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_query_and_category(pool: PgPool) {
    seed(&pool).await;

    // "amp" matches "Desk Lamp" by name and "Novel" by description.
    let response = get(common::build_test_app(pool.clone()), "/api/products?q=amp").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 2);

    let response =
        get(common::build_test_app(pool), "/api/products?q=amp&category=Home").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["name"], "Desk Lamp");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_sorts_by_allowed_column(pool: PgPool) {
    seed(&pool).await;

    let response = get(
        common::build_test_app(pool),
        "/api/products?sort_by=price&sort_dir=desc",
    )
    .await;
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Robot", "Kettle", "Desk Lamp", "Puzzle", "Novel"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_unknown_sort_column_falls_back_to_id(pool: PgPool) {
    seed(&pool).await;

    let response = get(
        common::build_test_app(pool),
        "/api/products?sort_by=name%3B%20DROP%20TABLE%20products",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_repeated_query_key_uses_last_value(pool: PgPool) {
    seed(&pool).await;

    let response = get(
        common::build_test_app(pool),
        "/api/products?page=1&page=2&per_page=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["data"][0]["name"], "Novel");
}
