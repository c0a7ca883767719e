//! Integration tests for the cart and favorites endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, future_date, get_auth, post_auth, post_json_auth,
    seed_spot, seed_ticket_type,
};
use sqlx::PgPool;
use trekpass_core::roles::ROLE_VISITOR;

// ---------------------------------------------------------------------------
// Cart lines
// ---------------------------------------------------------------------------

/// Adding the same (spot, ticket type, date) line twice merges quantities
/// instead of creating a duplicate row.
#[sqlx::test(migrations = "../db/migrations")]
async fn add_to_cart_merges_duplicate_lines(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "shopper", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool);

    let line = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 2,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, line.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;

    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, line).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = body_json(response).await;

    assert_eq!(first["id"], second["id"], "the same line is updated in place");
    assert_eq!(second["quantity"], 4);

    let response = get_auth(app, "/api/v1/cart", &token).await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 4);
    assert_eq!(items[0]["spot_name"], "Misty Peak");
}

/// Lines for inactive spots or past dates are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn add_to_cart_validations(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "shopper", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool.clone());

    let past = chrono::Utc::now().date_naive() - chrono::Duration::days(1);
    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": past.to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    trekpass_db::repositories::ScenicSpotRepo::deactivate(&pool, spot.id)
        .await
        .unwrap();
    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app, "/api/v1/cart", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Removing a line returns 204; removing it again (or someone else's line)
/// returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn remove_cart_line(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "shopper", ROLE_VISITOR).await;
    let (other, _) = create_test_user(&pool, "other", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let other_token = common::auth_token(&other);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool);

    let line = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, line).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/cart/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/v1/cart/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/cart/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Collecting a cart line moves the spot into favorites and drops the line.
#[sqlx::test(migrations = "../db/migrations")]
async fn collect_cart_line_moves_to_favorites(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "shopper", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool);

    let line = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, line).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_auth(app.clone(), &format!("/api/v1/cart/{id}/collect"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/v1/cart", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let response = get_auth(app, "/api/v1/collections", &token).await;
    let json = body_json(response).await;
    let collections = json["data"].as_array().unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0]["scenic_spot_id"], spot.id);
}

/// The cart is private: requests without a token are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn cart_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/cart").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favoriting a spot directly, then removing it.
#[sqlx::test(migrations = "../db/migrations")]
async fn add_and_remove_collection(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "shopper", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "scenic_spot_id": spot.id });
    let response = post_json_auth(app.clone(), "/api/v1/collections", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/collections/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/collections", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
