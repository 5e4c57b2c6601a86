//! Handler tests for Products domain
//!
//! These tests drive the products router end to end against the in-memory
//! repository:
//! - Validation rules and the 400 envelope
//! - Response bodies and status codes
//! - Not-found handling
//!
//! They cover only the products routes, not the full application with
//! CORS, docs and health.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> (Router, InMemoryProductRepository) {
    let repo = InMemoryProductRepository::new();
    let app = handlers::router(ProductService::new(repo.clone()));
    (app, repo)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, name: &str, price: f64) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({"name": name, "price": price})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201_and_available() {
    let (app, _) = app();

    let product = create(&app, "Monitor", 300.0).await;

    assert_eq!(product.name, "Monitor");
    assert_eq!(product.price, 300.0);
    assert!(product.availability);
    assert!(product.id > 0);
}

#[tokio::test]
async fn test_create_product_accepts_numeric_string_price() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({"name": "Lamp", "price": "42.5"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.price, 42.5);
}

#[tokio::test]
async fn test_create_product_rejects_invalid_input() {
    let (app, repo) = app();

    for body in [
        json!({"name": "Monitor", "price": 0}),
        json!({"name": "Monitor", "price": -3}),
        json!({"name": "", "price": 10}),
        json!({"name": "   ", "price": 10}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_error_envelope_lists_every_failure() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({"price": "abc"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["code"], 1001);
    assert_eq!(
        body["details"],
        json!([
            {"field": "name", "location": "body", "message": "Product name is required"},
            {"field": "price", "location": "body", "message": "Invalid price value"},
            {"field": "price", "location": "body", "message": "Price must be greater than zero"}
        ])
    );
}

#[tokio::test]
async fn test_non_string_name_is_a_validation_error() {
    let (app, repo) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({"name": 123, "price": 5})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([{"field": "name", "location": "body", "message": "Product name is required"}])
    );
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_returns_invalid_json() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_JSON");
}

fn text_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_create_ignores_json_sent_as_plain_text() {
    let (app, repo) = app();

    let response = app
        .oneshot(text_request("POST", "/", r#"{"name":"Lamp","price":5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_ignores_non_json_body() {
    let (app, _) = app();
    let product = create(&app, "Desk", 120.0).await;

    let response = app
        .oneshot(text_request("PATCH", &format!("/{}", product.id), "toggle"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let toggled: Product = json_body(response.into_body()).await;
    assert!(!toggled.availability);
}

#[tokio::test]
async fn test_get_product_with_non_integer_id_returns_400() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["details"],
        json!([{"field": "id", "location": "path", "message": "Invalid ID"}])
    );
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Product 999 not found");
}

#[tokio::test]
async fn test_list_returns_products_ordered_by_id() {
    let (app, _) = app();
    let first = create(&app, "Keyboard", 40.0).await;
    let second = create(&app, "Mouse", 25.0).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products, vec![first, second]);
    assert_eq!(products[0].name, "Keyboard");
    assert_eq!(products[1].price, 25.0);
}

#[tokio::test]
async fn test_update_product_overwrites_all_fields() {
    let (app, _) = app();
    let product = create(&app, "Desk", 150.0).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            json!({"name": "Standing desk", "price": 420, "availability": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(
        updated,
        Product {
            id: product.id,
            name: "Standing desk".to_string(),
            price: 420.0,
            availability: false,
        }
    );

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", product.id)))
        .await
        .unwrap();
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_product_returns_404_without_creating() {
    let (app, repo) = app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/41",
            json!({"name": "Chair", "price": 80, "availability": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_requires_boolean_availability() {
    let (app, _) = app();
    let product = create(&app, "Chair", 80.0).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            json!({"name": "Chair", "price": 80, "availability": "true"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["details"][0]["field"], "availability");
    assert_eq!(body["details"][0]["message"], "Invalid availability value");
}

#[tokio::test]
async fn test_patch_twice_restores_availability() {
    let (app, _) = app();
    let product = create(&app, "Headphones", 99.0).await;
    let uri = format!("/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("PATCH", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let toggled: Product = json_body(response.into_body()).await;
    assert!(!toggled.availability);

    let response = app.oneshot(empty_request("PATCH", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let restored: Product = json_body(response.into_body()).await;
    assert_eq!(restored, product);
}

#[tokio::test]
async fn test_patch_missing_product_returns_404() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("PATCH", "/7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let (app, _) = app();
    let product = create(&app, "Webcam", 60.0).await;
    let uri = format!("/{}", product.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: ProductDeleted = json_body(response.into_body()).await;
    assert_eq!(deleted.message, "Product deleted");

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
