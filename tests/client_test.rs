//! Session Client Integration Tests
//!
//! Exercises the bearer-injection and refresh-retry pipeline against a
//! local stub of the Trinity API bound to an ephemeral port.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use trinity_client::{ApiClient, ApiError, MemorySessionStore, SessionStore};

/// Stub API state shared with the test body
struct Stub {
    /// Access token `/products/` currently accepts
    valid_access: Mutex<String>,
    /// When set, `/products/` rejects every call regardless of token
    reject_products: AtomicBool,
    /// When cleared, the refresh endpoint rejects the refresh credential
    refresh_ok: AtomicBool,
    refresh_calls: AtomicUsize,
    product_calls: AtomicUsize,
    last_product_auth: Mutex<Option<String>>,
    last_token_auth: Mutex<Option<String>>,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            valid_access: Mutex::new("fresh-access".to_string()),
            reject_products: AtomicBool::new(false),
            refresh_ok: AtomicBool::new(true),
            refresh_calls: AtomicUsize::new(0),
            product_calls: AtomicUsize::new(0),
            last_product_auth: Mutex::new(None),
            last_token_auth: Mutex::new(None),
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn token_handler(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *stub.last_token_auth.lock() = bearer(&headers);

    if body["username"] == "amelia" && body["password"] == "correct-horse" {
        Json(json!({ "access": "fresh-access", "refresh": "refresh-1" })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn refresh_handler(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Response {
    stub.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if !stub.refresh_ok.load(Ordering::SeqCst) || body["refresh"] != "refresh-1" {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({ "access": "fresh-access" })).into_response()
}

async fn products_handler(State(stub): State<Arc<Stub>>, headers: HeaderMap) -> Response {
    stub.product_calls.fetch_add(1, Ordering::SeqCst);
    let auth = bearer(&headers);
    *stub.last_product_auth.lock() = auth.clone();

    let expected = format!("Bearer {}", stub.valid_access.lock());
    if stub.reject_products.load(Ordering::SeqCst) || auth.as_deref() != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!([{
        "id": 1,
        "name": "Espresso beans",
        "price": 12.5,
        "category": 1,
        "quantity_in_stock": 3,
        "created_at": null
    }]))
    .into_response()
}

async fn spawn_stub(stub: Arc<Stub>) -> String {
    let app = Router::new()
        .route("/auth/token/", post(token_handler))
        .route("/auth/token/refresh/", post(refresh_handler))
        .route("/products/", get(products_handler))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn setup(stub: Arc<Stub>) -> (ApiClient, Arc<MemorySessionStore>) {
    let base_url = spawn_stub(stub).await;
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(&base_url, store.clone()).unwrap();
    (client, store)
}

#[tokio::test]
async fn bearer_header_attached_when_token_stored() {
    let stub = Arc::new(Stub::default());
    let (client, store) = setup(stub.clone()).await;
    store.set_tokens("fresh-access", "refresh-1");

    let products: Vec<Value> = client.get("/products/").await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(
        stub.last_product_auth.lock().as_deref(),
        Some("Bearer fresh-access")
    );
}

#[tokio::test]
async fn no_bearer_header_without_token() {
    let stub = Arc::new(Stub::default());
    let (client, _store) = setup(stub.clone()).await;

    let result: Result<Vec<Value>, _> = client.get("/products/").await;

    // Unauthenticated request went out bare and the server rejected it;
    // with no refresh credential the session path reports expiry
    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(stub.last_product_auth.lock().is_none());
}

#[tokio::test]
async fn login_endpoint_is_never_decorated() {
    let stub = Arc::new(Stub::default());
    let (client, store) = setup(stub.clone()).await;
    // A stale session must not leak onto the token endpoint
    store.set_tokens("stale-access", "refresh-1");

    client.auth().login("amelia", "correct-horse").await.unwrap();

    assert!(stub.last_token_auth.lock().is_none());
    assert_eq!(store.access_token().as_deref(), Some("fresh-access"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let stub = Arc::new(Stub::default());
    let (client, store) = setup(stub.clone()).await;
    store.set_tokens("stale-access", "refresh-1");

    let products: Vec<Value> = client.get("/products/").await.unwrap();

    assert_eq!(products.len(), 1);
    // Exactly one refresh and exactly one retry
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stub.product_calls.load(Ordering::SeqCst), 2);
    // The retried request carried the newly issued credential
    assert_eq!(
        stub.last_product_auth.lock().as_deref(),
        Some("Bearer fresh-access")
    );
    assert_eq!(store.access_token().as_deref(), Some("fresh-access"));
}

#[tokio::test]
async fn retried_request_never_triggers_second_refresh() {
    let stub = Arc::new(Stub::default());
    stub.reject_products.store(true, Ordering::SeqCst);
    let (client, store) = setup(stub.clone()).await;
    store.set_tokens("stale-access", "refresh-1");

    let result: Result<Vec<Value>, _> = client.get("/products/").await;

    // The second 401 surfaces to the caller instead of looping
    match result {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, StatusCode::UNAUTHORIZED),
        other => panic!("expected 401 passthrough, got {:?}", other.map(|_| ())),
    }
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stub.product_calls.load(Ordering::SeqCst), 2);
    // Refresh itself succeeded, so the session survives
    assert_eq!(store.access_token().as_deref(), Some("fresh-access"));
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let stub = Arc::new(Stub::default());
    stub.refresh_ok.store(false, Ordering::SeqCst);
    let (client, store) = setup(stub.clone()).await;
    store.set_tokens("stale-access", "refresh-1");

    let result: Result<Vec<Value>, _> = client.get("/products/").await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    // The original request was not retried after the failed refresh
    assert_eq!(stub.product_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_refresh_credential_fails_without_refresh_call() {
    let stub = Arc::new(Stub::default());
    let (client, store) = setup(stub.clone()).await;
    store.set_access_token("stale-access");

    let result: Result<Vec<Value>, _> = client.get("/products/").await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(stub.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(store.access_token().is_none());
}
