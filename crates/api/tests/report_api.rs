//! Integration tests for `GET /api/v1/reports/summary`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get};
use gestora_core::records::{Client, InventoryItem, Order, OrderItem, Product};
use gestora_events::{InMemorySource, Snapshot};

const SUMMARY: &str = "/api/v1/reports/summary";

fn seeded_source() -> Arc<InMemorySource> {
    let now = Utc::now();
    let order = |id, client_id, total, age_days| Order {
        id,
        order_number: None,
        client_id: Some(client_id),
        status: "completed".into(),
        total,
        created_at: now - Duration::days(age_days),
    };
    let item = |id, order_id, product_id, quantity, price| OrderItem {
        id,
        order_id,
        product_id: Some(product_id),
        quantity,
        price,
    };
    let product = |id, name: &str, min_stock| Product {
        id,
        name: name.into(),
        min_stock,
    };

    Arc::new(InMemorySource::with_snapshot(Snapshot {
        orders: Some(vec![order(1, 1, 300.0, 0), order(2, 2, 120.0, 0), order(3, 1, 50.0, 400)]),
        order_items: Some(vec![
            item(1, 1, 10, 3, 100.0),
            item(2, 2, 11, 12, 10.0),
            item(3, 3, 11, 5, 10.0),
            OrderItem {
                id: 4,
                order_id: 2,
                product_id: None,
                quantity: 1,
                price: 999.0,
            },
        ]),
        products: Some(vec![
            product(10, "Taladro", Some(2)),
            product(11, "Brocas", None),
        ]),
        inventory: Some(vec![
            InventoryItem {
                id: 1,
                product_id: 10,
                quantity: 8,
            },
            InventoryItem {
                id: 2,
                product_id: 11,
                quantity: 0,
            },
        ]),
        clients: Some(vec![Client {
            id: 1,
            name: "Ferretería Sol".into(),
            email: None,
        }]),
        invoices: Some(Vec::new()),
        maintenances: Some(Vec::new()),
    }))
}

#[tokio::test]
async fn full_summary_contains_every_section() {
    let app = common::build_test_app_with(seeded_source());
    let response = get(&app.router, SUMMARY).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["orders"]["today"], 2);
    assert_eq!(data["sales"]["today"], 420.0);

    let products = data["top_products"].as_array().unwrap();
    assert_eq!(products[0]["name"], "Taladro");
    assert_eq!(products[0]["revenue"], 300.0);
    assert_eq!(products[1]["name"], "Brocas");
    assert_eq!(products[1]["quantity"], 17);

    let clients = data["top_clients"].as_array().unwrap();
    assert_eq!(clients[0]["name"], "Ferretería Sol");
    assert_eq!(clients[0]["order_count"], 2);
    assert_eq!(clients[1]["name"], "Cliente #2");

    let alerts = data["inventory_alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["name"], "Brocas");
    assert_eq!(alerts[0]["status"], "critical");
}

#[tokio::test]
async fn metric_selection_limits_sections() {
    let app = common::build_test_app_with(seeded_source());
    let response = get(&app.router, &format!("{SUMMARY}?metrics=top_clients&limit=1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert!(data.get("sales").is_none());
    assert!(data.get("inventory_alerts").is_none());
    assert_eq!(data["top_clients"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn date_range_restricts_rankings() {
    let app = common::build_test_app_with(seeded_source());
    let start = (Utc::now() - Duration::days(30)).date_naive();
    let response = get(
        &app.router,
        &format!("{SUMMARY}?metrics=top_products&start_date={start}"),
    )
    .await;

    let data = body_json(response).await["data"].clone();
    let products = data["top_products"].as_array().unwrap();
    assert_eq!(products[1]["name"], "Brocas");
    assert_eq!(products[1]["quantity"], 12);
}

#[tokio::test]
async fn unknown_metric_is_a_validation_error() {
    let app = common::build_test_app();
    let response = get(&app.router, &format!("{SUMMARY}?metrics=sales,profit")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn inverted_date_range_is_a_validation_error() {
    let app = common::build_test_app();
    let response = get(
        &app.router,
        &format!("{SUMMARY}?start_date=2024-03-10&end_date=2024-03-01"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unavailable_source_returns_503() {
    let app = common::build_test_app();
    app.source.update(|s| s.orders = None).await;

    let response = get(&app.router, SUMMARY).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "SOURCE_UNAVAILABLE");
}

#[tokio::test]
async fn empty_data_yields_zeroed_summary() {
    let app = common::build_test_app();
    let data = body_json(get(&app.router, SUMMARY).await).await["data"].clone();

    assert_eq!(data["sales"]["year"], 0.0);
    assert_eq!(data["orders"]["month"], 0);
    assert!(data["top_products"].as_array().unwrap().is_empty());
}
