#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use storefront_api::auth::jwt::{generate_access_token, JwtConfig, SELLER_SUBJECT};
use storefront_api::config::{SellerCredentials, ServerConfig};
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_core::roles::{ROLE_SELLER, ROLE_USER};
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product};
use storefront_db::{MemoryStore, Store};

pub const SELLER_EMAIL: &str = "seller@shop.test";
pub const SELLER_PASSWORD: &str = "seller-password";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
        seller: SellerCredentials {
            email: SELLER_EMAIL.to_string(),
            password: SELLER_PASSWORD.to_string(),
        },
    }
}

/// Full application router over `store`, with the production middleware stack.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh store plus a router over it.
pub fn new_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(Arc::clone(&store));
    (store, app)
}

pub fn buyer_token(user_id: DbId) -> String {
    generate_access_token(user_id, ROLE_USER, &test_config().jwt).unwrap()
}

pub fn seller_token() -> String {
    generate_access_token(SELLER_SUBJECT, ROLE_SELLER, &test_config().jwt).unwrap()
}

pub async fn seed_product(store: &MemoryStore, name: &str, price: f64) -> Product {
    store
        .create_product(&CreateProduct {
            name: name.to_string(),
            description: vec![format!("{name} description")],
            price,
            offer_price: None,
            image: vec![format!("{name}.png")],
            category: "general".to_string(),
            in_stock: None,
        })
        .await
        .unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST a raw string body with a JSON content type.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
