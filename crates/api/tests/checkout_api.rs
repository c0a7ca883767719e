//! Integration tests for buy-now and cart checkout, including the per-date
//! inventory ledger behaviour behind them.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, future_date, post_json_auth, seed_spot, seed_ticket_type,
};
use sqlx::PgPool;
use trekpass_core::roles::ROLE_VISITOR;
use trekpass_db::models::date_stock::ReserveOutcome;
use trekpass_db::repositories::{CartRepo, DateStockRepo};

// ---------------------------------------------------------------------------
// Buy now
// ---------------------------------------------------------------------------

/// Buying creates a Pending order and a ledger row seeded from the ticket
/// type's default stock.
#[sqlx::test(migrations = "../db/migrations")]
async fn buy_now_reserves_inventory(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 5).await;
    let date = future_date();
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": date.to_string(),
        "quantity": 3,
    });
    let response = post_json_auth(app, "/api/v1/checkout/buy-now", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], 0, "new orders start Pending");
    assert_eq!(json["quantity"], 3);
    assert_eq!(json["user_id"], user.id);
    assert_eq!(
        json["order_number"].as_str().unwrap().len(),
        20,
        "order number is 14-digit timestamp plus 6 random digits"
    );

    let ledger = DateStockRepo::find_for_date(&pool, ticket.id, date)
        .await
        .unwrap()
        .expect("ledger row should exist after first purchase");
    assert_eq!(ledger.stock, 2);
    assert_eq!(ledger.sold, 3);
}

/// A reservation past the remaining stock returns 409 and leaves the ledger
/// untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn buy_now_insufficient_stock_conflicts(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 2).await;
    let date = future_date();
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": date.to_string(),
        "quantity": 3,
    });
    let response = post_json_auth(app, "/api/v1/checkout/buy-now", &token, body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let ledger = DateStockRepo::find_for_date(&pool, ticket.id, date)
        .await
        .unwrap()
        .expect("ledger row is created even when the reservation fails");
    assert_eq!(ledger.stock, 2);
    assert_eq!(ledger.sold, 0);
}

/// Two racing reservations of 3 against stock 5: the guarded update admits
/// exactly one, the other sees insufficient stock.
#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_reserves_admit_one(pool: PgPool) {
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 5).await;
    let date = future_date();

    let ledger = DateStockRepo::get_or_create(&pool, ticket.id, date, ticket.default_stock)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        DateStockRepo::reserve(&pool, ledger.id, 3),
        DateStockRepo::reserve(&pool, ledger.id, 3),
    );
    let outcomes = [first.unwrap(), second.unwrap()];
    let reserved = outcomes
        .iter()
        .filter(|o| **o == ReserveOutcome::Reserved)
        .count();
    assert_eq!(reserved, 1, "exactly one reservation wins: {outcomes:?}");

    let ledger = DateStockRepo::find_for_date(&pool, ticket.id, date)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.stock, 2);
    assert_eq!(ledger.sold, 3);
}

/// Zero quantity and past dates are rejected before touching inventory.
#[sqlx::test(migrations = "../db/migrations")]
async fn buy_now_validates_input(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 5).await;
    let app = common::build_test_app(pool);

    let zero_qty = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 0,
    });
    let response = post_json_auth(app.clone(), "/api/v1/checkout/buy-now", &token, zero_qty).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let past = chrono::Utc::now().date_naive() - chrono::Duration::days(1);
    let past_date = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": past.to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app, "/api/v1/checkout/buy-now", &token, past_date).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Buying without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn buy_now_requires_auth(pool: PgPool) {
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 5).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 1,
    });
    let response = common::post_json(app, "/api/v1/checkout/buy-now", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Paying a pending order moves it to Paid and attaches a weather advisory.
#[sqlx::test(migrations = "../db/migrations")]
async fn pay_order_marks_paid(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 5).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": ticket.id,
        "use_date": future_date().to_string(),
        "quantity": 1,
    });
    let response = post_json_auth(app.clone(), "/api/v1/checkout/buy-now", &token, body).await;
    let order = body_json(response).await;
    let order_id = order["id"].as_i64().unwrap();

    let response =
        common::post_auth(app.clone(), &format!("/api/v1/orders/{order_id}/pay"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["order"]["status"], 1);
    assert!(
        json["weather"].is_object(),
        "mock weather client always produces a forecast"
    );

    // Paying again is a conflict: the order is no longer Pending.
    let response =
        common::post_auth(app, &format!("/api/v1/orders/{order_id}/pay"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Batch payment pays pending orders and reports the rest as skipped.
#[sqlx::test(migrations = "../db/migrations")]
async fn batch_pay_skips_non_pending(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let ticket = seed_ticket_type(&pool, spot.id, 10).await;
    let app = common::build_test_app(pool);

    let mut order_ids = Vec::new();
    for _ in 0..2 {
        let body = serde_json::json!({
            "scenic_spot_id": spot.id,
            "ticket_type_id": ticket.id,
            "use_date": future_date().to_string(),
            "quantity": 1,
        });
        let response =
            post_json_auth(app.clone(), "/api/v1/checkout/buy-now", &token, body).await;
        let order = body_json(response).await;
        order_ids.push(order["id"].as_i64().unwrap());
    }

    // Pay the first one up front so the batch sees a non-pending order.
    let response = common::post_auth(
        app.clone(),
        &format!("/api/v1/orders/{}/pay", order_ids[0]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "order_ids": order_ids });
    let response = post_json_auth(app, "/api/v1/orders/pay", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["paid"].as_array().unwrap().len(), 1);
    assert_eq!(json["paid"][0]["id"], order_ids[1]);
    assert_eq!(json["skipped"].as_array().unwrap().len(), 1);
    assert_eq!(json["skipped"][0], order_ids[0]);
}

// ---------------------------------------------------------------------------
// Cart checkout
// ---------------------------------------------------------------------------

/// Cart checkout converts lines independently: a line that cannot reserve
/// reports an error and stays in the cart, while its siblings succeed.
#[sqlx::test(migrations = "../db/migrations")]
async fn cart_checkout_partial_failure(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let spot = seed_spot(&pool, "Misty Peak", None).await;
    let plenty = seed_ticket_type(&pool, spot.id, 10).await;
    let scarce = seed_ticket_type(&pool, spot.id, 1).await;
    let date = future_date();
    let app = common::build_test_app(pool.clone());

    let ok_line = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": plenty.id,
        "use_date": date.to_string(),
        "quantity": 2,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, ok_line).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ok_id = body_json(response).await["id"].as_i64().unwrap();

    let doomed_line = serde_json::json!({
        "scenic_spot_id": spot.id,
        "ticket_type_id": scarce.id,
        "use_date": date.to_string(),
        "quantity": 5,
    });
    let response = post_json_auth(app.clone(), "/api/v1/cart", &token, doomed_line).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let doomed_id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "cart_item_ids": [ok_id, doomed_id] });
    let response = post_json_auth(app, "/api/v1/checkout/cart", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0]["order"].is_object());
    assert!(results[0]["error"].is_null());
    assert!(results[1]["order"].is_null());
    assert!(results[1]["error"].is_string());

    // Only the failed line remains in the cart.
    let remaining = CartRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, doomed_id);
}

/// Checking out an empty selection is a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn cart_checkout_rejects_empty_selection(pool: PgPool) {
    let (user, _pw) = create_test_user(&pool, "buyer", ROLE_VISITOR).await;
    let token = common::auth_token(&user);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "cart_item_ids": [] });
    let response = post_json_auth(app, "/api/v1/checkout/cart", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
