// Shared fixtures for integration tests

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use realty_api::api::{create_router, AppState};
use realty_api::auth::{AuthService, TokenSigner};
use realty_api::config::Config;
use realty_api::records::RecordService;
use realty_api::store::{JsonFileRecordStore, JsonFileUserStore};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Matches the secret in `Config::test_config` so tests can mint their own
/// tokens when they need full control over the claims.
pub const TEST_SECRET: &str = "integration-test-signing-key";

pub struct TestApp {
    pub router: Router,
    pub records_path: PathBuf,
    // Held so the temp dir outlives the app
    _dir: TempDir,
}

/// Record fixture mirroring the shape of the scraped listing file
pub fn sample_records() -> Value {
    json!([
        {
            "id": 2018724576_i64,
            "price": "$922,500",
            "address": {"street": "54 Turbayne Crescent"},
            "features": {"beds": 3, "baths": 2, "parking": 2, "propertyType": "House"}
        },
        {
            "id": 2019000001_i64,
            "price": "$1,150,000",
            "address": {"street": "12 Wattle Street"},
            "features": {"beds": 4, "baths": 2, "parking": 1, "propertyType": "House"}
        },
        {
            "id": 2019000002_i64,
            "price": "$640,000",
            "address": {"street": "7/3 Gould Place"},
            "features": {"beds": 2, "baths": 1, "parking": 1, "propertyType": "Apartment"}
        }
    ])
}

/// User fixture: one enabled account, one disabled.
///
/// Hashes use the minimum bcrypt cost - these tests exercise the flow, not
/// the work factor.
fn sample_users() -> Value {
    let alice_hash = bcrypt::hash("s3cret", 4).unwrap();
    let mallory_hash = bcrypt::hash("s3cret", 4).unwrap();
    json!({
        "alice": {
            "username": "alice",
            "full_name": "Alice Example",
            "email": "alice@example.com",
            "password_hash": alice_hash,
            "disabled": false
        },
        "mallory": {
            "username": "mallory",
            "full_name": "Mallory Example",
            "email": "mallory@example.com",
            "password_hash": mallory_hash,
            "disabled": true
        }
    })
}

/// Build a router backed by freshly written JSON files in a temp dir
pub fn build_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let records_path = dir.path().join("data.json");
    let users_path = dir.path().join("users.json");

    std::fs::write(&records_path, serde_json::to_string_pretty(&sample_records()).unwrap())
        .unwrap();
    std::fs::write(&users_path, serde_json::to_string_pretty(&sample_users()).unwrap()).unwrap();

    let config = Config::test_config(records_path.clone(), users_path.clone());

    let signer = TokenSigner::new(
        &config.token_secret,
        Duration::from_secs(config.token_ttl_minutes * 60),
    );
    let user_store = Arc::new(JsonFileUserStore::new(users_path));
    let record_store = Arc::new(JsonFileRecordStore::new(records_path.clone()));

    let app_state = AppState {
        auth: Arc::new(AuthService::new(user_store, signer)),
        records: Arc::new(RecordService::new(record_store)),
        config: Arc::new(config),
    };

    TestApp {
        router: create_router(app_state),
        records_path,
        _dir: dir,
    }
}

/// POST /token with form-encoded credentials
pub async fn post_login(app: &TestApp, username: &str, password: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", username, password)))
        .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

/// Log in as the enabled fixture user and return the bearer token
pub async fn login_as_alice(app: &TestApp) -> String {
    let response = post_login(app, "alice", "s3cret").await;
    assert_eq!(response.status(), 200, "fixture login must succeed");
    let body = read_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

/// Send an authenticated request with the given method and path
pub async fn send_with_bearer(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

/// Send an unauthenticated request
pub async fn send_plain(app: &TestApp, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

/// POST a JSON body
pub async fn post_json(app: &TestApp, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();

    app.router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into JSON
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes (for byte-identical comparisons)
pub async fn read_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
