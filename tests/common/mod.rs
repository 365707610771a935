#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use inventory_api::{app_router, config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness for spinning up the application backed by a private
/// in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            5001,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    /// Send a request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a fully built request.
    pub async fn request_with(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a request with a raw, possibly malformed, JSON body.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .expect("failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request");
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.request(Method::GET, uri, None).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self.request(Method::POST, uri, Some(body)).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self.request(Method::PUT, uri, Some(body)).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.request(Method::DELETE, uri, None).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    /// Create a product through the API and return its JSON record.
    pub async fn create_product(
        &self,
        name: &str,
        category: &str,
        price: f64,
        stock_quantity: i32,
        sku: &str,
    ) -> Value {
        let (status, body) = self
            .post(
                "/api/products",
                json!({
                    "name": name,
                    "category": category,
                    "price": price,
                    "stock_quantity": stock_quantity,
                    "sku": sku,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body
    }

    /// Seed the five-product store used by the stock-status scenarios:
    /// quantities 15, 3, 0, 25 and 50.
    pub async fn seed_mixed_stock(&self) -> Vec<Value> {
        let mut created = Vec::new();
        for (name, category, quantity, sku) in [
            ("Bluetooth Speaker", "Electronics", 15, "ELE003"),
            ("Gaming Mouse", "Electronics", 3, "ELE002"),
            ("Office Chair", "Furniture", 0, "FUR001"),
            ("Printer Paper", "Supplies", 25, "SUP003"),
            ("Rice", "Groceries", 50, "GRO001"),
        ] {
            created.push(
                self.create_product(name, category, 10.0, quantity, sku)
                    .await,
            );
        }
        created
    }
}

/// Read a response body as JSON (`Null` when empty).
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not json")
    }
}

/// Collect a string field from every record of a JSON array.
pub fn field_values(records: &Value, field: &str) -> Vec<String> {
    records
        .as_array()
        .expect("expected a json array")
        .iter()
        .map(|r| match &r[field] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
