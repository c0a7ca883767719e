//! Platform-admin handlers, mounted at `/admin`. Everything here is global:
//! users, lookup tables, spots, orders, comments, news, and carousels.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trekpass_core::error::CoreError;
use trekpass_core::roles::{is_valid_role, RoleId, ROLE_VISITOR};
use trekpass_core::types::DbId;
use trekpass_db::models::carousel::{Carousel, CreateCarousel};
use trekpass_db::models::category::{Category, CreateCategory, UpdateCategory};
use trekpass_db::models::comment::{Comment, CommentFilter, CommentListing};
use trekpass_db::models::news::{CreateNews, News, UpdateNews};
use trekpass_db::models::order::{OrderFilter, OrderListing, OrderStatusCounts};
use trekpass_db::models::region::{CreateRegion, Region, UpdateRegion};
use trekpass_db::models::scenic_spot::{
    CreateScenicSpot, ScenicSpot, ScenicSpotListing, SpotFilter, UpdateScenicSpot,
};
use trekpass_db::models::user::{CreateUser, RoleCounts, UpdateUser, UserResponse};
use trekpass_db::repositories::{
    clamp_limit, clamp_offset, CarouselRepo, CategoryRepo, CommentRepo, NewsRepo, OrderRepo,
    RegionRepo, ScenicSpotRepo, UserRepo,
};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard payload for the platform admin landing page.
#[derive(Debug, Serialize)]
pub struct AdminDashboardResponse {
    pub total_users: i64,
    pub total_spots: i64,
    pub today_orders: i64,
    pub total_sales: Decimal,
    pub recent_orders: Vec<OrderListing>,
    pub unreplied_comments: Vec<CommentListing>,
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<AdminDashboardResponse>> {
    let total_users = UserRepo::count(&state.pool).await?;
    let total_spots = ScenicSpotRepo::count(&state.pool, None).await?;
    let today_orders = OrderRepo::today_count(&state.pool, None).await?;
    let total_sales = OrderRepo::total_paid_sales(&state.pool, None).await?;
    let recent_orders = OrderRepo::recent(&state.pool, None, 2).await?;
    let unreplied_comments = CommentRepo::oldest_unreplied(&state.pool, None, 2).await?;

    Ok(Json(AdminDashboardResponse {
        total_users,
        total_spots,
        today_orders,
        total_sales,
        recent_orders,
        unreplied_comments,
    }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<RoleId>,
}

/// Response body for `GET /admin/users`: the filtered list plus per-role
/// counts for the header.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub counts: RoleCounts,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<UserListResponse>> {
    let users = UserRepo::list(&state.pool, params.role).await?;
    let counts = UserRepo::role_counts(&state.pool).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
        counts,
    }))
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<RoleId>,
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = input.role.unwrap_or(ROLE_VISITOR);
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation("Unknown role".into())));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role) = input.role {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation("Unknown role".into())));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(user.into()))
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// POST /api/v1/admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &password_hash).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivation; order history stays intact.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == user.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot deactivate your own account".into(),
        )));
    }

    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/regions
pub async fn create_region(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateRegion>,
) -> AppResult<(StatusCode, Json<Region>)> {
    let region = RegionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(region)))
}

/// PUT /api/v1/admin/regions/{id}
pub async fn update_region(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRegion>,
) -> AppResult<Json<Region>> {
    let region = RegionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }))?;
    Ok(Json(region))
}

/// DELETE /api/v1/admin/regions/{id}
pub async fn delete_region(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RegionRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Spots
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/spots`.
#[derive(Debug, Deserialize)]
pub struct AdminSpotListParams {
    pub search: Option<String>,
    pub region_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/spots
pub async fn list_spots(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(params): Query<AdminSpotListParams>,
) -> AppResult<Json<DataResponse<Vec<ScenicSpotListing>>>> {
    let filter = SpotFilter {
        search: params.search,
        region_id: params.region_id,
        category_id: params.category_id,
        hot_only: false,
        include_inactive: true,
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let spots = ScenicSpotRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: spots }))
}

/// POST /api/v1/admin/spots
///
/// Unlike the scenic-admin surface, the platform admin chooses `admin_id`
/// freely (or leaves the spot unmanaged).
pub async fn create_spot(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateScenicSpot>,
) -> AppResult<(StatusCode, Json<ScenicSpot>)> {
    if input.price < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }

    let spot = ScenicSpotRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(spot)))
}

/// PUT /api/v1/admin/spots/{id}
pub async fn update_spot(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScenicSpot>,
) -> AppResult<Json<ScenicSpot>> {
    let spot = ScenicSpotRepo::update(&state.pool, id, None, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id,
        }))?;
    Ok(Json(spot))
}

/// DELETE /api/v1/admin/spots/{id}
pub async fn deactivate_spot(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ScenicSpotRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Response body for `GET /admin/orders`.
#[derive(Debug, Serialize)]
pub struct AdminOrderListResponse {
    pub orders: Vec<OrderListing>,
    pub counts: OrderStatusCounts,
}

/// GET /api/v1/admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(filter): Query<OrderFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<AdminOrderListResponse>> {
    let limit = clamp_limit(page.limit);
    let offset = clamp_offset(page.offset);

    let orders = OrderRepo::list(&state.pool, &filter, None, limit, offset).await?;
    let counts = OrderRepo::status_counts(&state.pool, None).await?;

    Ok(Json(AdminOrderListResponse { orders, counts }))
}

/// DELETE /api/v1/admin/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !OrderRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/comments
pub async fn list_comments(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(filter): Query<CommentFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CommentListing>>>> {
    let limit = clamp_limit(page.limit);
    let offset = clamp_offset(page.offset);

    let comments = CommentRepo::list(&state.pool, &filter, None, limit, offset).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// Request body for `POST /admin/comments/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct AdminReplyRequest {
    pub reply: String,
}

/// POST /api/v1/admin/comments/{id}/reply
pub async fn reply_comment(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AdminReplyRequest>,
) -> AppResult<Json<Comment>> {
    if input.reply.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reply must not be empty".into(),
        )));
    }

    let comment = CommentRepo::reply(&state.pool, id, None, input.reply.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    Ok(Json(comment))
}

/// DELETE /api/v1/admin/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CommentRepo::delete(&state.pool, id, None).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// News & carousels
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/news
pub async fn create_news(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateNews>,
) -> AppResult<(StatusCode, Json<News>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let news = NewsRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/v1/admin/news/{id}
pub async fn update_news(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNews>,
) -> AppResult<Json<News>> {
    let news = NewsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "News", id }))?;
    Ok(Json(news))
}

/// DELETE /api/v1/admin/news/{id}
pub async fn delete_news(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "News", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/carousels
pub async fn list_carousels(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Carousel>>>> {
    let carousels = CarouselRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: carousels }))
}

/// POST /api/v1/admin/carousels
pub async fn create_carousel(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateCarousel>,
) -> AppResult<(StatusCode, Json<Carousel>)> {
    ScenicSpotRepo::find_by_id(&state.pool, input.scenic_spot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id: input.scenic_spot_id,
        }))?;

    let carousel = CarouselRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(carousel)))
}

/// DELETE /api/v1/admin/carousels/{id}
pub async fn delete_carousel(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CarouselRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Carousel",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
