// Integration tests for the listing routes

use crate::common::{
    build_app, login_as_alice, read_json, sample_records, send_with_bearer,
};
use serde_json::json;

#[tokio::test]
async fn test_list_returns_full_collection() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let response = send_with_bearer(&app, "GET", "/data", &token).await;
    assert_eq!(response.status(), 200);

    let body = read_json(response).await;
    assert_eq!(body, sample_records());
}

#[tokio::test]
async fn test_get_by_id_returns_exact_record() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let response = send_with_bearer(&app, "GET", "/data/2018724576", &token).await;
    assert_eq!(response.status(), 200);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Item obtained successfully");

    let item = &body["item"];
    assert_eq!(item["id"], 2018724576_i64);
    assert_eq!(item["price"], "$922,500");
    assert_eq!(item["address"]["street"], "54 Turbayne Crescent");
    assert_eq!(item["features"]["beds"], 3);
    assert_eq!(item["features"]["baths"], 2);
    assert_eq!(item["features"]["parking"], 2);
    assert_eq!(item["features"]["propertyType"], "House");
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let response = send_with_bearer(&app, "GET", "/data/9999999999", &token).await;
    assert_eq!(response.status(), 404);
    assert_eq!(read_json(response).await["error"], "Item not found");
}

#[tokio::test]
async fn test_delete_removes_record_and_returns_it() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let before = read_json(send_with_bearer(&app, "GET", "/data", &token).await).await;
    let original_length = before.as_array().unwrap().len();

    let response = send_with_bearer(&app, "DELETE", "/data/2018724576", &token).await;
    assert_eq!(response.status(), 200);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Item deleted successfully");
    assert_eq!(body["item"]["id"], 2018724576_i64);
    assert_eq!(body["item"]["price"], "$922,500");

    // Length decreases by exactly one
    let after = read_json(send_with_bearer(&app, "GET", "/data", &token).await).await;
    assert_eq!(after.as_array().unwrap().len(), original_length - 1);

    // The deleted record is gone
    let lookup = send_with_bearer(&app, "GET", "/data/2018724576", &token).await;
    assert_eq!(lookup.status(), 404);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404_and_mutates_nothing() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let response = send_with_bearer(&app, "DELETE", "/data/9999999999", &token).await;
    assert_eq!(response.status(), 404);
    assert_eq!(read_json(response).await["error"], "Item not found");

    let listing = read_json(send_with_bearer(&app, "GET", "/data", &token).await).await;
    assert_eq!(listing, sample_records());
}

#[tokio::test]
async fn test_delete_persists_to_storage() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    send_with_bearer(&app, "DELETE", "/data/2019000001", &token).await;

    // Read the durable file directly, not through the service
    let raw = std::fs::read_to_string(&app.records_path).unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let ids: Vec<i64> = persisted
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();

    assert!(!ids.contains(&2019000001));
    assert_eq!(ids.len(), 2);
}

#[tokio::test]
async fn test_record_routes_require_auth() {
    let app = build_app();

    for (method, uri) in [
        ("GET", "/data"),
        ("GET", "/data/2018724576"),
        ("DELETE", "/data/2018724576"),
    ] {
        let response = crate::common::send_plain(&app, method, uri).await;
        assert_eq!(response.status(), 401, "{} {} must require auth", method, uri);
    }
}

#[tokio::test]
async fn test_malformed_record_file_is_500_not_empty_list() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    std::fs::write(&app.records_path, "{definitely not a listing array").unwrap();

    let response = send_with_bearer(&app, "GET", "/data", &token).await;
    assert_eq!(response.status(), 500);
    assert_eq!(read_json(response).await["error"], "Storage unavailable");
}

#[tokio::test]
async fn test_failure_responses_carry_request_id() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/data/9999999999")
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {}", token))
        .header("x-request-id", "req-integration-1")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await.unwrap();
    assert_eq!(response.status(), 404);

    let body = read_json(response).await;
    assert_eq!(body["request_id"], "req-integration-1");
}

#[tokio::test]
async fn test_delete_is_idempotent_in_effect() {
    let app = build_app();
    let token = login_as_alice(&app).await;

    let first = send_with_bearer(&app, "DELETE", "/data/2019000002", &token).await;
    assert_eq!(first.status(), 200);

    let second = send_with_bearer(&app, "DELETE", "/data/2019000002", &token).await;
    assert_eq!(second.status(), 404);

    let listing = read_json(send_with_bearer(&app, "GET", "/data", &token).await).await;
    assert_eq!(
        listing,
        json!(sample_records().as_array().unwrap()[..2].to_vec())
    );
}
