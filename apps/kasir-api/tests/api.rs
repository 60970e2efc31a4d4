//! End-to-end tests driving the full router over an in-memory database.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Local, NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kasir_api::{build_app, AppState};
use kasir_core::CheckoutItem;
use kasir_db::{Database, DbConfig};

async fn app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    (build_app(AppState::new(db.clone())), db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_product(app: &Router, nama: &str, harga: i64, stok: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/produk",
        Some(json!({ "nama": nama, "harga": harga, "stok": stok })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_ok() {
    let (app, _) = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK", "message": "API running" }));
}

#[tokio::test]
async fn test_health_reports_unavailable_store() {
    let (app, db) = app().await;
    db.close().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "ERROR");
}

// =============================================================================
// Resources
// =============================================================================

#[tokio::test]
async fn test_product_lifecycle() {
    let (app, _) = app().await;

    let id = create_product(&app, "Indomie", 1500, 10).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/produk/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "nama": "Indomie", "harga": 1500, "stok": 10 }));

    // Body id is ignored, the path wins.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/produk/{}", id),
        Some(json!({ "id": 999, "nama": "Indomie Goreng", "harga": 2000, "stok": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["harga"], 2000);

    let (status, body) = send(&app, Method::GET, "/api/produk", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/produk/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/produk/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_removes_only_the_matching_row() {
    let (app, _) = app().await;

    let keep = create_product(&app, "KitKat", 8000, 28).await;
    let gone = create_product(&app, "LifeBoy", 5000, 41).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/produk/{}", gone), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/produk", None).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![keep]);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/produk/{}", gone), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_routes() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/kategori",
        Some(json!({ "nama": "Makanan", "description": "Kategori makanan ringan dan berat" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/kategori/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nama"], "Makanan");

    let (status, _) = send(&app, Method::PUT, "/api/kategori/404", Some(json!({ "nama": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_resource_input() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/produk",
        Some(json!({ "nama": "", "harga": 1000, "stok": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/produk",
        Some(json!({ "nama": "Indomie", "harga": -1, "stok": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/produk", Some(json!({ "nama": "Indomie" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/produk/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_and_unknown_path() {
    let (app, _) = app().await;

    let (status, _) = send(&app, Method::PATCH, "/api/produk", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&app, Method::GET, "/api/checkout", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&app, Method::GET, "/api/tidak-ada", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_creates_transaction() {
    let (app, db) = app().await;
    let indomie = create_product(&app, "Indomie", 1500, 10).await;
    let kitkat = create_product(&app, "KitKat", 8000, 28).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": indomie, "quantity": 2 },
            { "product_id": kitkat, "quantity": 1 }
        ] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 2 * 1500 + 8000);
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    let id = body["id"].as_i64().unwrap();
    assert!(details.iter().all(|d| d["transaction_id"] == id));

    let (_, product) = send(&app, Method::GET, &format!("/api/produk/{}", indomie), None).await;
    assert_eq!(product["stok"], 8);
    assert_eq!(db.transactions().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_checkout_has_no_quantity_or_line_cap() {
    let (app, _) = app().await;
    let beras = create_product(&app, "Beras", 1000, 5000).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": beras, "quantity": 1000 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 1000 * 1000);

    let lines: Vec<Value> = (0..101)
        .map(|_| json!({ "product_id": beras, "quantity": 1 }))
        .collect();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": lines })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["details"].as_array().unwrap().len(), 101);

    let (_, product) = send(&app, Method::GET, &format!("/api/produk/{}", beras), None).await;
    assert_eq!(product["stok"], 5000 - 1000 - 101);
}

#[tokio::test]
async fn test_checkout_with_lock() {
    let (app, _) = app().await;
    let id = create_product(&app, "LifeBoy", 5000, 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout?lock=true",
        Some(json!({ "items": [{ "product_id": id, "quantity": 2 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 10000);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout?lock=true",
        Some(json!({ "items": [{ "product_id": id, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
}

#[tokio::test]
async fn test_rejected_checkouts_write_nothing() {
    let (app, db) = app().await;
    let id = create_product(&app, "Indomie", 1500, 3).await;

    let cases = [
        (json!({ "items": [] }), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        (
            json!({ "items": [{ "product_id": id, "quantity": 0 }] }),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
        (
            json!({ "items": [{ "product_id": id, "quantity": 1 }, { "product_id": 777, "quantity": 1 }] }),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
        (
            json!({ "items": [{ "product_id": id, "quantity": 4 }] }),
            StatusCode::CONFLICT,
            "INSUFFICIENT_STOCK",
        ),
    ];

    for (payload, expected_status, expected_code) in cases {
        let (status, body) = send(&app, Method::POST, "/api/checkout", Some(payload)).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["code"], expected_code);
    }

    assert_eq!(db.transactions().count().await.unwrap(), 0);
    let (_, product) = send(&app, Method::GET, &format!("/api/produk/{}", id), None).await;
    assert_eq!(product["stok"], 3);
}

#[tokio::test]
async fn test_sold_product_cannot_be_deleted() {
    let (app, _) = app().await;
    let id = create_product(&app, "KitKat", 8000, 28).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": id, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/produk/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_report_for_today() {
    let (app, _) = app().await;
    let indomie = create_product(&app, "Indomie", 1500, 10).await;
    let kitkat = create_product(&app, "KitKat", 8000, 28).await;

    for (product_id, quantity) in [(indomie, 5), (kitkat, 9)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/checkout",
            Some(json!({ "items": [{ "product_id": product_id, "quantity": quantity }] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let expected = json!({
        "total_revenue": 5 * 1500 + 9 * 8000,
        "total_transaksi": 2,
        "produk_terlaris": { "nama": "KitKat", "qty_terjual": 9 }
    });

    let (status, body) = send(&app, Method::GET, "/api/report/hari-ini", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (_, body) = send(&app, Method::GET, "/api/report?start=&end=", None).await;
    assert_eq!(body, expected);

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let uri = format!("/api/report?start={}&end={}", today, today);
    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body, expected);
}

fn on_day(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 30)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

async fn checkout_on_day(db: &Database, product_id: i64, quantity: i64, hour: u32) {
    AppState::new(db.clone())
        .transactions()
        .checkout_at(&[CheckoutItem { product_id, quantity }], false, on_day(hour))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_report_sums_a_day_of_transactions() {
    let (app, db) = app().await;
    let teh = create_product(&app, "Teh Botol", 1000, 10).await;
    let sabun = create_product(&app, "Sabun", 2500, 10).await;

    checkout_on_day(&db, teh, 1, 9).await;
    checkout_on_day(&db, sabun, 1, 17).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/report?start=2026-01-30&end=2026-01-30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_revenue"], 3500);
    assert_eq!(body["total_transaksi"], 2);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/report?start=2026-01-31&end=2026-01-31",
        None,
    )
    .await;
    assert_eq!(body["total_transaksi"], 0);
}

#[tokio::test]
async fn test_report_best_seller_is_highest_quantity() {
    let (app, db) = app().await;
    let p1 = create_product(&app, "P1", 1000, 20).await;
    let p2 = create_product(&app, "P2", 1000, 20).await;

    checkout_on_day(&db, p1, 5, 10).await;
    checkout_on_day(&db, p2, 9, 11).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/report?start=2026-01-30&end=2026-01-30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["produk_terlaris"], json!({ "nama": "P2", "qty_terjual": 9 }));
}

#[tokio::test]
async fn test_report_empty_window() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/report?start=2020-01-01&end=2020-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_revenue": 0,
            "total_transaksi": 0,
            "produk_terlaris": { "nama": "-", "qty_terjual": 0 }
        })
    );
}

#[tokio::test]
async fn test_report_rejects_bad_dates() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/report?start=kemarin&end=2026-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
