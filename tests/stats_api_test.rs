mod common;

use axum::http::StatusCode;
use common::{field_values, TestApp};
use inventory_api::entities::product;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;

#[tokio::test]
async fn stats_on_empty_store() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_products"], 0);
    assert_eq!(body["low_stock_items"], 0);
    assert_eq!(body["out_of_stock"], 0);
    assert_eq!(body["total_categories"], 0);
    assert_eq!(body["total_value"], 0.0);
    assert_eq!(body["categories"], json!({}));
    assert_eq!(body["recent_activity"], json!([]));
}

#[tokio::test]
async fn stats_for_mixed_stock_levels() {
    let app = TestApp::new().await;
    app.seed_mixed_stock().await;

    let (status, body) = app.get("/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_products"], 5);
    assert_eq!(body["low_stock_items"], 2);
    assert_eq!(body["out_of_stock"], 1);
    assert_eq!(body["total_categories"], 4);
    assert_eq!(
        body["categories"],
        json!({ "Electronics": 2, "Furniture": 1, "Groceries": 1, "Supplies": 1 })
    );
    // 10.0 each over 93 units
    assert_eq!(body["total_value"], 930.0);
}

#[tokio::test]
async fn stats_counters_agree_with_listing_filters() {
    let app = TestApp::new().await;
    app.seed_mixed_stock().await;
    for (name, quantity, sku) in [("Eggs", 9, "GRO012"), ("Salt", 1, "GRO004"), ("Flour", 0, "GRO005")] {
        app.create_product(name, "Groceries", 2.5, quantity, sku).await;
    }

    let (_, stats) = app.get("/api/stats").await;
    let (_, out) = app.get("/api/products?status=out-of-stock").await;
    let (_, low) = app.get("/api/products?status=low-stock").await;
    let (_, low_endpoint) = app.get("/api/products/low-stock").await;

    let out_count = out.as_array().unwrap().len() as u64;
    let low_count = low.as_array().unwrap().len() as u64;

    assert_eq!(stats["out_of_stock"], out_count);
    assert_eq!(stats["low_stock_items"], low_count + out_count);
    assert_eq!(
        low_endpoint.as_array().unwrap().len() as u64,
        low_count + out_count
    );
}

#[tokio::test]
async fn stats_report_value_overflow_as_server_error() {
    let app = TestApp::new().await;
    app.seed_mixed_stock().await;
    // Written straight to the table, bypassing the API price bound
    product::ActiveModel {
        name: Set("Vault".into()),
        category: Set("Furniture".into()),
        price: Set(Decimal::from_i128_with_scale(7 * 10i128.pow(27), 0)),
        stock_quantity: Set(2_000_000_000),
        sku: Set("FUR999".into()),
        description: Set(None),
        ..Default::default()
    }
    .insert(&*app.state.db)
    .await
    .unwrap();

    let (status, body) = app.get("/api/stats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");

    let (status, _) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recent_activity_lists_newest_five() {
    let app = TestApp::new().await;
    app.seed_mixed_stock().await;
    app.create_product("Wireless Headphones", "Electronics", 4999.0, 12, "ELE001")
        .await;

    let (_, body) = app.get("/api/stats").await;
    let activity = body["recent_activity"].as_array().unwrap();

    assert_eq!(activity.len(), 5);
    assert_eq!(
        activity[0]["description"],
        "Wireless Headphones - SKU: ELE001"
    );
    assert_eq!(activity[0]["title"], "New product added");
    assert_eq!(activity[0]["icon"], "📦");

    let descriptions = field_values(&body["recent_activity"], "description");
    // The first product created drops off the feed
    assert!(!descriptions.contains(&"Bluetooth Speaker - SKU: ELE003".to_string()));

    let office_chair = activity
        .iter()
        .find(|a| a["description"] == "Office Chair - SKU: FUR001")
        .unwrap();
    assert_eq!(office_chair["title"], "Low stock alert - Only 0 units left");
    assert_eq!(office_chair["icon"], "⚠️");

    let time = activity[0]["time"].as_str().unwrap();
    assert_eq!(time.len(), 5);
    assert_eq!(&time[2..3], ":");
}

#[tokio::test]
async fn activity_feed_is_static() {
    let app = TestApp::new().await;
    app.seed_mixed_stock().await;

    let (status, body) = app.get("/api/activity").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "type": "product_added",
                "title": "New product added",
                "description": "Wireless Headphones - SKU: ELE001",
                "created_at": "2025-07-18T10:30:00Z"
            },
            {
                "type": "low_stock",
                "title": "Low stock alert",
                "description": "Gaming Mouse - Only 3 units left",
                "created_at": "2025-07-18T08:15:00Z"
            },
            {
                "type": "report_generated",
                "title": "Monthly report generated",
                "description": "July inventory summary completed",
                "created_at": "2025-07-17T14:20:00Z"
            }
        ])
    );
}

#[tokio::test]
async fn home_reports_running() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Inventory Management API", "status": "running" })
    );
}

#[tokio::test]
async fn health_checks_the_database() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn responses_echo_request_id() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .uri("/api/home")
        .header("x-request-id", "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.request_with(request).await;

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-42"
    );
}
