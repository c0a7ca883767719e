//! Favorites (collections) handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use trekpass_core::error::CoreError;
use trekpass_core::types::DbId;
use trekpass_db::models::collection::{Collection, CollectionListing};
use trekpass_db::repositories::{CollectionRepo, ScenicSpotRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/collections
pub async fn list_collections(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CollectionListing>>>> {
    let items = CollectionRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// Request body for `POST /collections`.
#[derive(Debug, Deserialize)]
pub struct AddCollectionRequest {
    pub scenic_spot_id: DbId,
}

/// POST /api/v1/collections
pub async fn add_collection(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AddCollectionRequest>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    ScenicSpotRepo::find_by_id(&state.pool, input.scenic_spot_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id: input.scenic_spot_id,
        }))?;

    let collection =
        CollectionRepo::add(&state.pool, auth_user.user_id, input.scenic_spot_id).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// DELETE /api/v1/collections/{id}
pub async fn remove_collection(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CollectionRepo::delete_for_user(&state.pool, id, auth_user.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
