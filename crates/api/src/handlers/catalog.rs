//! Public catalog handlers: home page aggregate, spot browsing, comments,
//! and the region/category lookup lists.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trekpass_core::error::CoreError;
use trekpass_core::types::DbId;
use trekpass_db::models::carousel::Carousel;
use trekpass_db::models::comment::{CommentListing, CreateComment};
use trekpass_db::models::news::News;
use trekpass_db::models::scenic_spot::{ScenicSpot, ScenicSpotListing, SpotFilter};
use trekpass_db::models::ticket_type::TicketType;
use trekpass_db::repositories::{
    clamp_limit, clamp_offset, CarouselRepo, CategoryRepo, CommentRepo, DateStockRepo, NewsRepo,
    RegionRepo, ScenicSpotRepo, TicketTypeRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

/// Aggregate payload for the landing page.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub carousels: Vec<Carousel>,
    pub announcements: Vec<News>,
    pub latest_news: Vec<News>,
    pub hot_spots: Vec<ScenicSpot>,
}

/// GET /api/v1/home
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomeResponse>> {
    let carousels = CarouselRepo::list_active(&state.pool).await?;
    let announcements = NewsRepo::latest_announcements(&state.pool, 3).await?;
    let latest_news = NewsRepo::list(&state.pool, false, None, 4, 0).await?;
    let hot_spots = ScenicSpotRepo::hot_spots(&state.pool, 6).await?;

    Ok(Json(HomeResponse {
        carousels,
        announcements,
        latest_news,
        hot_spots,
    }))
}

// ---------------------------------------------------------------------------
// Spots
// ---------------------------------------------------------------------------

/// Query parameters for `GET /spots`.
#[derive(Debug, Deserialize)]
pub struct SpotListParams {
    pub search: Option<String>,
    pub region_id: Option<DbId>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub hot_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/spots
pub async fn list_spots(
    State(state): State<AppState>,
    Query(params): Query<SpotListParams>,
) -> AppResult<Json<DataResponse<Vec<ScenicSpotListing>>>> {
    let filter = SpotFilter {
        search: params.search,
        region_id: params.region_id,
        category_id: params.category_id,
        hot_only: params.hot_only,
        include_inactive: false,
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let spots = ScenicSpotRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: spots }))
}

/// Spot detail payload: the spot plus its active ticket types and the most
/// recent comments.
#[derive(Debug, Serialize)]
pub struct SpotDetailResponse {
    #[serde(flatten)]
    pub spot: ScenicSpot,
    pub ticket_types: Vec<TicketType>,
    pub comments: Vec<CommentListing>,
}

/// GET /api/v1/spots/{id}
pub async fn get_spot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SpotDetailResponse>> {
    let spot = ScenicSpotRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id,
        }))?;

    let ticket_types = TicketTypeRepo::list_for_spot(&state.pool, id, true).await?;
    let comments = CommentRepo::list_for_spot(&state.pool, id, 20, 0).await?;

    Ok(Json(SpotDetailResponse {
        spot,
        ticket_types,
        comments,
    }))
}

/// Query parameters for `GET /spots/{id}/stocks`.
#[derive(Debug, Deserialize)]
pub struct StockParams {
    pub ticket_type_id: DbId,
    pub date: NaiveDate,
}

/// Remaining stock for one (ticket type, date) pair.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub ticket_type_id: DbId,
    pub date: NaiveDate,
    pub remaining: i32,
    pub sold: i32,
}

/// GET /api/v1/spots/{id}/stocks?ticket_type_id=&date=
///
/// Reports `default_stock` when no ledger row exists for the date yet; the
/// row itself is only created at first purchase or stock edit.
pub async fn spot_stocks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<StockParams>,
) -> AppResult<Json<StockResponse>> {
    let ticket_type = TicketTypeRepo::find_by_id(&state.pool, params.ticket_type_id)
        .await?
        .filter(|t| t.scenic_spot_id == id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket type",
            id: params.ticket_type_id,
        }))?;

    let (remaining, sold) =
        match DateStockRepo::find_for_date(&state.pool, ticket_type.id, params.date).await? {
            Some(ledger) => (ledger.stock, ledger.sold),
            None => (ticket_type.default_stock.max(0), 0),
        };

    Ok(Json(StockResponse {
        ticket_type_id: ticket_type.id,
        date: params.date,
        remaining,
        sold,
    }))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/spots/{id}/comments
pub async fn spot_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CommentListing>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let comments = CommentRepo::list_for_spot(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// Request body for `POST /spots/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// POST /api/v1/spots/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<trekpass_db::models::comment::Comment>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment must not be empty".into(),
        )));
    }

    ScenicSpotRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id,
        }))?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            user_id: auth_user.user_id,
            scenic_spot_id: id,
            content: input.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

// ---------------------------------------------------------------------------
// Lookup lists
// ---------------------------------------------------------------------------

/// GET /api/v1/regions
pub async fn list_regions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<trekpass_db::models::region::Region>>>> {
    let regions = RegionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: regions }))
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<trekpass_db::models::category::Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}
