//! Shared helpers for HTTP-level integration tests.
//!
//! [`build_test_app`] mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses. The weather client runs in mock
//! mode, so no outbound requests leave the test process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use trekpass_api::auth::jwt::{generate_access_token, JwtConfig};
use trekpass_api::auth::password::hash_password;
use trekpass_api::config::ServerConfig;
use trekpass_api::router::build_app_router;
use trekpass_api::state::AppState;
use trekpass_api::weather::{WeatherClient, WeatherConfig};
use trekpass_core::types::DbId;
use trekpass_db::models::category::CreateCategory;
use trekpass_db::models::region::CreateRegion;
use trekpass_db::models::scenic_spot::{CreateScenicSpot, ScenicSpot};
use trekpass_db::models::ticket_type::{CreateTicketType, TicketType};
use trekpass_db::models::user::{CreateUser, User};
use trekpass_db::repositories::{
    CategoryRepo, RegionRepo, ScenicSpotRepo, TicketTypeRepo, UserRepo,
};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a fixed JWT secret so tokens minted by [`auth_token`] validate
/// against the app, and leaves the weather API key unset so the client
/// stays in mock mode.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 120,
        },
        weather: WeatherConfig {
            api_url: "http://127.0.0.1:0/weather".to_string(),
            api_key: None,
            timeout_secs: 1,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let weather = Arc::new(WeatherClient::new(config.weather.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        weather,
    };

    build_app_router(state, &config)
}

/// Mint a valid access token for the given user, signed with the test
/// config's secret.
pub fn auth_token(user: &User) -> String {
    generate_access_token(user.id, user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with a bearer token and an empty body, for action endpoints like
/// `/orders/{id}/pay` that take no request payload.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
pub async fn create_test_user(pool: &PgPool, name: &str, role: i16) -> (User, String) {
    let password = "test_password_123";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: hashed,
        role,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Create a region, a category, and an active scenic spot. `admin_id` is the
/// managing scenic admin, if any.
pub async fn seed_spot(pool: &PgPool, name: &str, admin_id: Option<DbId>) -> ScenicSpot {
    let region = RegionRepo::create(
        pool,
        &CreateRegion {
            name: format!("{name} region"),
            display_order: None,
        },
    )
    .await
    .expect("region creation should succeed");

    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            code: format!("{name}-cat"),
            name: format!("{name} category"),
            display_order: None,
        },
    )
    .await
    .expect("category creation should succeed");

    ScenicSpotRepo::create(
        pool,
        &CreateScenicSpot {
            name: name.to_string(),
            description: format!("{name} description"),
            price: rust_decimal::Decimal::new(10000, 2),
            image_path: None,
            address: "1 Test Road".to_string(),
            opening_hours: "08:00-18:00".to_string(),
            is_hot: Some(false),
            region_id: region.id,
            category_id: category.id,
            tags: None,
            admin_id,
        },
    )
    .await
    .expect("spot creation should succeed")
}

/// Create an active ticket type for the given spot.
pub async fn seed_ticket_type(pool: &PgPool, spot_id: DbId, default_stock: i32) -> TicketType {
    TicketTypeRepo::create(
        pool,
        &CreateTicketType {
            scenic_spot_id: spot_id,
            name: "Adult day pass".to_string(),
            kind: "single".to_string(),
            price: rust_decimal::Decimal::new(5000, 2),
            description: None,
            default_stock,
        },
    )
    .await
    .expect("ticket type creation should succeed")
}

/// A use date safely in the future, formatted for request bodies via
/// `to_string` (ISO 8601).
pub fn future_date() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive() + chrono::Duration::days(7)
}
