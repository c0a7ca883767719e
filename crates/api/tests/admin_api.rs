//! Integration tests for the platform admin surface: user management,
//! lookup tables, spot oversight, order oversight, news, and carousels.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth, seed_spot,
};
use sqlx::PgPool;
use trekpass_core::roles::{ROLE_ADMIN, ROLE_SCENIC_ADMIN, ROLE_VISITOR};
use trekpass_db::models::comment::CreateComment;
use trekpass_db::repositories::{CommentRepo, ScenicSpotRepo};

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// The platform surface requires the admin role; scenic admins get 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn scenic_admin_forbidden(pool: PgPool) {
    let (scenic, _) = create_test_user(&pool, "scenic", ROLE_SCENIC_ADMIN).await;
    let token = common::auth_token(&scenic);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json["code"].is_string());
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Admins provision accounts with any role; the roster reports per-role
/// counts.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_list_users(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "gatekeeper",
        "email": "gatekeeper@test.com",
        "password": "long_enough_pw",
        "role": ROLE_SCENIC_ADMIN,
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], 1);

    let bad_role = serde_json::json!({
        "username": "nobody",
        "email": "nobody@test.com",
        "password": "long_enough_pw",
        "role": 9,
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", &token, bad_role).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["users"].as_array().unwrap().len(), 2);
    assert_eq!(json["counts"]["total"], 2);
    assert_eq!(json["counts"]["scenic_admins"], 1);
    assert_eq!(json["counts"]["admins"], 1);
}

/// Password resets take effect immediately for login.
#[sqlx::test(migrations = "../db/migrations")]
async fn reset_password_for_user(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let (target, _) = create_test_user(&pool, "target", ROLE_VISITOR).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "new_password": "reset_by_admin" });
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/reset-password", target.id),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let login = serde_json::json!({
        "email": "target@test.com",
        "password": "reset_by_admin",
        "role": 0,
    });
    let response = post_json(app, "/api/v1/auth/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Deactivation is a soft delete; self-deactivation is refused.
#[sqlx::test(migrations = "../db/migrations")]
async fn deactivate_user_rules(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let (target, _) = create_test_user(&pool, "target", ROLE_VISITOR).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let response =
        delete_auth(app.clone(), &format!("/api/v1/admin/users/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response =
        delete_auth(app, &format!("/api/v1/admin/users/{}", target.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Regions and categories are managed here and served publicly.
#[sqlx::test(migrations = "../db/migrations")]
async fn manage_regions_and_categories(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Northern Highlands" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/regions", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let region_id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "name": "Northern Fells" });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/regions/{region_id}"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Northern Fells");

    let body = serde_json::json!({ "code": "lake", "name": "Lakes" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/categories", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/api/v1/regions").await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "Northern Fells");

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/admin/regions/{region_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/admin/regions/{region_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Spot oversight
// ---------------------------------------------------------------------------

/// The admin spot list includes deactivated spots that the public listing
/// hides.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_spot_list_includes_inactive(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let spot = seed_spot(&pool, "Closed Valley", None).await;
    ScenicSpotRepo::deactivate(&pool, spot.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/spots").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let response = get_auth(app, "/api/v1/admin/spots", &token).await;
    let json = body_json(response).await;
    let spots = json["data"].as_array().unwrap();
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0]["is_active"], false);
}

// ---------------------------------------------------------------------------
// News and carousels
// ---------------------------------------------------------------------------

/// Announcements created here surface on the landing aggregate.
#[sqlx::test(migrations = "../db/migrations")]
async fn news_lifecycle(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "title": "Trail maintenance this weekend",
        "content": "The east trail closes Saturday morning.",
        "is_announcement": true,
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/news", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let news_id = body_json(response).await["id"].as_i64().unwrap();

    let response = get(app.clone(), "/api/v1/home").await;
    let json = body_json(response).await;
    let announcements = json["announcements"].as_array().unwrap();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0]["title"], "Trail maintenance this weekend");

    let body = serde_json::json!({ "title": "Trail maintenance postponed" });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/admin/news/{news_id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), &format!("/api/v1/news/{news_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["title"], "Trail maintenance postponed");

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/news/{news_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/news/{news_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Carousel slides must point at an existing spot.
#[sqlx::test(migrations = "../db/migrations")]
async fn carousel_requires_existing_spot(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "scenic_spot_id": spot.id + 1000,
        "image_path": "/img/slide-1.jpg",
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/carousels", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "image_path": "/img/slide-1.jpg",
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/carousels", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get(app.clone(), "/api/v1/home").await;
    let json = body_json(response).await;
    assert_eq!(json["carousels"].as_array().unwrap().len(), 1);

    let response =
        delete_auth(app, &format!("/api/v1/admin/carousels/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Order oversight
// ---------------------------------------------------------------------------

/// The admin order list reports per-status counts and supports hard
/// deletion.
#[sqlx::test(migrations = "../db/migrations")]
async fn order_oversight(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let (visitor, _) = create_test_user(&pool, "visitor", ROLE_VISITOR).await;
    let admin_token = common::auth_token(&admin);
    let visitor_token = common::auth_token(&visitor);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = common::seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": common::future_date().to_string(),
        "quantity": 1,
    });
    let response =
        post_json_auth(app.clone(), "/api/v1/checkout/buy-now", &visitor_token, body).await;
    let order_id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/v1/admin/orders", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["orders"].as_array().unwrap().len(), 1);
    assert_eq!(json["counts"]["pending"], 1);

    let response =
        delete_auth(app.clone(), &format!("/api/v1/admin/orders/{order_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        delete_auth(app, &format!("/api/v1/admin/orders/{order_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Comment moderation
// ---------------------------------------------------------------------------

/// The moderation list narrows by reply state and by content or spot-name
/// search.
#[sqlx::test(migrations = "../db/migrations")]
async fn comment_list_filters(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin", ROLE_ADMIN).await;
    let (visitor, _) = create_test_user(&pool, "visitor", ROLE_VISITOR).await;
    let token = common::auth_token(&admin);
    let peak = seed_spot(&pool, "Misty Peak", None).await;
    let lake = seed_spot(&pool, "Crystal Lake", None).await;

    for (spot_id, content) in [
        (peak.id, "Is the summit trail open in winter?"),
        (lake.id, "Crowded on weekends, come early."),
    ] {
        CommentRepo::create(
            &pool,
            &CreateComment {
                user_id: visitor.id,
                scenic_spot_id: spot_id,
                content: content.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/admin/comments", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    let summit_id = comments
        .iter()
        .find(|c| c["spot_name"] == "Misty Peak")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let uri = format!("/api/v1/admin/comments/{summit_id}/reply");
    let body = serde_json::json!({ "reply": "Yes, with proper gear." });
    let response = post_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Reply-state filter: only the lake comment is still waiting.
    let response = get_auth(app.clone(), "/api/v1/admin/comments?is_replied=false", &token).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["spot_name"], "Crystal Lake");

    let response = get_auth(app.clone(), "/api/v1/admin/comments?is_replied=true", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Search matches spot name or comment content, case-insensitively.
    let response = get_auth(app.clone(), "/api/v1/admin/comments?search=misty", &token).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["spot_name"], "Misty Peak");

    let response = get_auth(app, "/api/v1/admin/comments?search=crowded", &token).await;
    let json = body_json(response).await;
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["spot_name"], "Crystal Lake");
}
