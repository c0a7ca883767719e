//! Public news and announcement handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use trekpass_core::error::CoreError;
use trekpass_core::types::DbId;
use trekpass_db::models::news::News;
use trekpass_db::repositories::{clamp_limit, clamp_offset, NewsRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /news`.
#[derive(Debug, Deserialize)]
pub struct NewsListParams {
    /// When true, only announcements are returned.
    #[serde(default)]
    pub announcements_only: bool,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/news
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<NewsListParams>,
) -> AppResult<Json<DataResponse<Vec<News>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let news = NewsRepo::list(
        &state.pool,
        params.announcements_only,
        params.search.as_deref(),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: news }))
}

/// GET /api/v1/news/{id}
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<News>> {
    let item = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "News", id }))?;
    Ok(Json(item))
}
